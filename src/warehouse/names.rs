//! Asset names the warehouse scene is addressed by

pub const SCENE: &str = "warehouse";

pub const BACKGROUND: &str = "warehouse";
pub const MOUSE: &str = "mouse";
pub const CANDLE: &str = "candle";
pub const CANDLE_FIRE: &str = "candle_fire";
pub const CHEESE: &str = "cheese";
pub const LENS: &str = "lens";
pub const LENS_BEAM: &str = "lens_beam";
/// Dark overlay covering the whole room
pub const DARKNESS: &str = "darkness";
/// Circle cut out of the darkness
pub const FLASHLIGHT: &str = "flashlight";

/// Texture names
pub mod tex {
    pub const MOUSE_WALK: [&str; 5] = [
        "wh_mouse2",
        "wh_mouse3",
        "wh_mouse4",
        "wh_mouse5",
        "wh_mouse1",
    ];
    pub const CANDLE_FIRE: [&str; 4] = [
        "wh_candle_fire2",
        "wh_candle_fire3",
        "wh_candle_fire4",
        "wh_candle_fire1",
    ];
}
