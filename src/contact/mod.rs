//! Contact categories and pairwise contact routing
//!
//! Bodies never push each other; contacts are pure triggers. Each scene
//! declares a closed enum of categories, one bit each, and asks for
//! contacts "ordered" by the categories it cares about.

pub mod world;

pub use world::{ContactEvent, ContactWorld};

use std::fmt;

use glam::Vec2;

use crate::scene::NodeId;

/// A closed set of one-bit contact categories
pub trait ContactCategory: Copy + Eq + fmt::Debug + 'static {
    /// Every category of the scene
    const ALL: &'static [Self];

    fn mask(self) -> u32;

    /// Reverse lookup; anything that is not exactly one known bit is unknown
    fn from_mask(mask: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.mask() == mask)
    }

    /// OR of the masks of `list`
    fn combined(list: &[Self]) -> u32 {
        list.iter().fold(0, |mask, c| mask | c.mask())
    }
}

/// Collision shape, centered on the node's anchor
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyShape {
    Rect { size: Vec2 },
    Circle { radius: f32 },
}

/// Trigger body attached to a node
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsBody<C> {
    pub category: C,
    /// Categories that raise notifications on contact with this body
    pub contact_test: u32,
    /// Always zero; bodies pass through each other
    pub collision: u32,
    pub shape: BodyShape,
}

impl<C: ContactCategory> PhysicsBody<C> {
    pub fn new(shape: BodyShape, contact: &[C], category: C) -> Self {
        Self {
            category,
            contact_test: C::combined(contact),
            collision: 0,
            shape,
        }
    }

    pub fn rect(size: Vec2, contact: &[C], category: C) -> Self {
        Self::new(BodyShape::Rect { size }, contact, category)
    }

    pub fn circle(radius: f32, contact: &[C], category: C) -> Self {
        Self::new(BodyShape::Circle { radius }, contact, category)
    }

    /// Whether a contact between the two bodies should be reported
    pub fn tests_against(&self, other: &PhysicsBody<C>) -> bool {
        self.contact_test & other.category.mask() != 0
            || other.contact_test & self.category.mask() != 0
    }
}

/// One body taking part in a contact, as raw node + category bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawBody {
    pub node: NodeId,
    pub mask: u32,
}

/// An unordered pair of touching bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub a: RawBody,
    pub b: RawBody,
}

/// One side of an ordered contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactSide<C> {
    pub node: NodeId,
    pub category: C,
}

/// A contact split into the body the caller asked about and the other one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderedContact<C> {
    pub main: ContactSide<C>,
    pub other: ContactSide<C>,
}

impl Contact {
    pub fn new(a: NodeId, a_mask: u32, b: NodeId, b_mask: u32) -> Self {
        Self {
            a: RawBody { node: a, mask: a_mask },
            b: RawBody { node: b, mask: b_mask },
        }
    }

    pub fn involves(&self, node: NodeId) -> bool {
        self.a.node == node || self.b.node == node
    }

    /// Order the contact by the caller's categories of interest.
    ///
    /// Categories are tried in list order and the first one either body
    /// carries makes that body `main`, so swapping `a` and `b` never changes
    /// the answer. When both bodies carry the same wanted category the one
    /// with the lower node id is `main`. Bodies with unknown bits and pairs
    /// nobody asked about resolve to `None`.
    pub fn ordered<C: ContactCategory>(&self, interest: &[C]) -> Option<OrderedContact<C>> {
        let category_a = C::from_mask(self.a.mask)?;
        let category_b = C::from_mask(self.b.mask)?;
        let side_a = ContactSide {
            node: self.a.node,
            category: category_a,
        };
        let side_b = ContactSide {
            node: self.b.node,
            category: category_b,
        };
        for wanted in interest {
            let a_hit = self.a.mask & wanted.mask() != 0;
            let b_hit = self.b.mask & wanted.mask() != 0;
            let a_is_main = match (a_hit, b_hit) {
                (false, false) => continue,
                (true, false) => true,
                (false, true) => false,
                // Same category on both sides
                (true, true) => self.a.node <= self.b.node,
            };
            return Some(if a_is_main {
                OrderedContact {
                    main: side_a,
                    other: side_b,
                }
            } else {
                OrderedContact {
                    main: side_b,
                    other: side_a,
                }
            });
        }
        None
    }
}
