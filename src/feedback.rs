//! Outputs a scene hands back to the host
//!
//! Haptics and sounds are requests; the host decides how to play them.
//! Settings switches filter them at the source.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "name", rename_all = "snake_case")]
pub enum Output {
    Vibrate,
    PlaySound(String),
    /// Every puzzle of the scene is solved
    Won,
}

/// Callback invoked once when the scene is won
pub type WinCallback = Box<dyn FnMut()>;

/// Output queue of one scene
pub struct Feedback {
    outputs: Vec<Output>,
    haptics: bool,
    sounds: bool,
    win_callback: Option<WinCallback>,
}

impl Feedback {
    pub fn new(settings: &Settings) -> Self {
        Self {
            outputs: Vec::new(),
            haptics: settings.haptics,
            sounds: settings.sounds,
            win_callback: None,
        }
    }

    pub fn vibrate(&mut self) {
        if self.haptics {
            self.outputs.push(Output::Vibrate);
        }
    }

    pub fn play_sound(&mut self, name: impl Into<String>) {
        if self.sounds {
            self.outputs.push(Output::PlaySound(name.into()));
        }
    }

    /// Report the win; callers guarantee this happens once per scene
    pub fn won(&mut self) {
        self.outputs.push(Output::Won);
        if let Some(callback) = self.win_callback.as_mut() {
            callback();
        }
    }

    pub fn set_win_callback(&mut self, callback: WinCallback) {
        self.win_callback = Some(callback);
    }

    pub fn drain(&mut self) -> Vec<Output> {
        std::mem::take(&mut self.outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_switches_filter_outputs() {
        let settings = Settings {
            haptics: false,
            ..Settings::default()
        };
        let mut feedback = Feedback::new(&settings);
        feedback.vibrate();
        feedback.play_sound("fly");
        assert_eq!(feedback.drain(), vec![Output::PlaySound("fly".into())]);
        assert!(feedback.drain().is_empty());
    }

    #[test]
    fn test_win_runs_callback() {
        let fired = Rc::new(Cell::new(0));
        let seen = Rc::clone(&fired);
        let mut feedback = Feedback::new(&Settings::default());
        feedback.set_win_callback(Box::new(move || seen.set(seen.get() + 1)));
        feedback.won();
        assert_eq!(fired.get(), 1);
        assert_eq!(feedback.drain(), vec![Output::Won]);
    }
}
