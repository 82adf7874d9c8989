//! Asset names the bath scene is addressed by

pub const SCENE: &str = "bath";

// Face
pub const FACE: &str = "face";
pub const FROST: &str = "frost";
pub const LEFT_BROW: &str = "left_brow";
pub const RIGHT_BROW: &str = "right_brow";
pub const EYES: &str = "eyes";
pub const LEFT_EYEBALL: &str = "left_eyeball";
pub const RIGHT_EYEBALL: &str = "right_eyeball";
pub const MOUTH_DEFAULT: &str = "mouth_default";
pub const MOUTH_INSIDE: &str = "mouth_inside";
pub const MOUTH_BRUSHED: &str = "mouth_brushed";
pub const JAW_TOP: &str = "jaw_top";
pub const JAW_BOTTOM: &str = "jaw_bottom";
pub const LIP_TOP: &str = "lip_top";
pub const LIP_BOTTOM: &str = "lip_bottom";
pub const LEFT_CHEEK: &str = "left_cheek";
pub const RIGHT_CHEEK: &str = "right_cheek";
pub const EAR_LEFT: &str = "ear_left";
pub const EAR_RIGHT: &str = "ear_right";
pub const DIRT: &str = "dirt";

// Hair
pub const HAIR_LEFT_INITIAL: &str = "hair_left_initial";
pub const HAIR_LEFT_FIXED: &str = "hair_left_fixed";
pub const HAIR_RIGHT_INITIAL: &str = "hair_right_initial";
pub const HAIR_RIGHT_FIXED_LEFT: &str = "hair_right_fixed_left";
pub const HAIR_RIGHT_FIXED_RIGHT: &str = "hair_right_fixed_right";
pub const HAIR_RIGHT_FIXED_UP: &str = "hair_right_fixed_up";
pub const HAIR_RIGHT_FIXED_DOWN: &str = "hair_right_fixed_down";
/// Stubble pieces are numbered `hair_piece2` ..= `hair_piece45`
pub const HAIR_PIECE: &str = "hair_piece";
pub const HAIR_PIECE_FIRST: u32 = 2;
pub const HAIR_PIECE_LAST: u32 = 45;

// Pimples
pub const PIMPLE1_INITIAL: &str = "pimple1_initial";
pub const PIMPLE1_BLEEDING: &str = "pimple1_bleeding";
pub const PIMPLE1_FIXED: &str = "pimple1_fixed";
pub const PIMPLE1_PINCH_ZONE: &str = "pimple1_pinch_zone";
pub const PIMPLE2: &str = "pimple2";
pub const PIMPLE2_PINCH_ZONE: &str = "pimple2_pinch_zone";
pub const PIMPLE3: &str = "pimple3";
pub const PIMPLE3_PINCH_ZONE: &str = "pimple3_pinch_zone";

// Body
pub const SHIRT: &str = "shirt";
pub const SHIRT_ZONE: &str = "shirt_zone";
pub const SHIRT_STAIN: &str = "shirt_stain";
pub const ARMPIT: &str = "armpit";
pub const SMELL: &str = "smell";
pub const SPRAY: [&str; 3] = ["spray1", "spray2", "spray3"];

// Sink
pub const SINK: &str = "sink";
pub const CRANE: &str = "crane";
pub const COLD_VALVE: &str = "cold_valve";
pub const HOT_VALVE: &str = "hot_valve";
pub const WATER: &str = "water";
pub const STEAM: [&str; 3] = ["steam1", "steam2", "steam3"];
pub const WATER_FALLING: [&str; 3] = ["water_falling1", "water_falling2", "water_falling3"];

// Tools
pub const TOOTHBRUSH: &str = "toothbrush";
pub const TOOTHBRUSH_TOP: &str = "toothbrush_top";
pub const MAGENTA_CUP: &str = "magenta_cup";
pub const RAZOR: &str = "razor";
pub const RAZOR_TOP: &str = "razor_top";
pub const TOWEL: &str = "towel_dry";
pub const BANDAGE: &str = "bandage";
pub const TOILET_WATER: &str = "toilet_water";
pub const COMB: &str = "comb";
pub const DEODORANT: &str = "deodorant";
pub const STICK_LEFT: &str = "stick_left";
pub const STICK_RIGHT: &str = "stick_right";

// Fly
pub const FLY: &str = "fly";
pub const FLY_BODY: &str = "fly_body";
pub const FLY_NOSE: &str = "fly_nose";
pub const FLY_WINGS: &str = "fly_wings";
pub const WEB: &str = "web";

pub fn hair_piece(index: u32) -> String {
    format!("{HAIR_PIECE}{index}")
}

/// Texture names
pub mod tex {
    pub const EYES_DEFAULT: &str = "bath_eyes_default";
    pub const EYES_DAMAGED: &str = "bath_eyes_damaged";
    pub const TAP_WATER: [&str; 3] = ["bath_tap_water2", "bath_tap_water3", "bath_tap_water1"];
    pub const CRANE_DEFAULT: &str = "bath_tap_crane_default";
    pub const CRANE_COLD: &str = "bath_tap_crane_cold";
    pub const CUP: &str = "bath_cup_magenta";
    pub const CUP_FILLED: &str = "bath_cup_magenta_filled";
    pub const TOOTHBRUSH_PASTE: &str = "bath_toothbrush_paste";
    pub const TOOTHBRUSH: &str = "bath_toothbrush";
    pub const JAW_TOP: &str = "bath_jaw_top";
    pub const JAW_BOTTOM: &str = "bath_jaw_bottom";
    pub const JAW_TOP_FIXED: &str = "bath_jaw_top_fixed";
    pub const JAW_BOTTOM_FIXED: &str = "bath_jaw_bottom_fixed";
    pub const TOWEL_DRY: &str = "bath_towel_dry";
    pub const TOWEL_WET: &str = "bath_towel_wet";
    pub const RAZOR: &str = "bath_razor";
    pub const RAZOR_IN_USE: &str = "bath_razor_inuse";
    pub const FLY_WINGS: [&str; 2] = ["bath_fly_wings_2", "bath_fly_wings_1"];
    pub const DEODORANT: &str = "bath_deodorant";
    pub const DEODORANT_SHAKEN: &str = "bath_deodorant_shaken";
}

/// Sound names
pub mod sound {
    pub const VALVE: &str = "valve";
    pub const OUCH: &str = "ouch";
    pub const SPIT: &str = "spit";
    pub const SPRAY: &str = "spray";
    pub const SPLASH: &str = "splash";
    pub const FLY_BUZZ: &str = "fly_buzz";
    pub const SHAVE: &str = "shave";
    pub const EAR_CLEAN: &str = "ear_clean";
    pub const SQUEEZE: &str = "squeeze";
}
