use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

pub struct ActionPlugin;

impl Plugin for ActionPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<LauncherAction>::default())
            .init_resource::<ActionState<LauncherAction>>()
            .insert_resource(LauncherAction::default_input_map());
    }
}

/// Keys the launcher's controls react to. Read with `just_pressed`, so each
/// physical press counts once no matter how long it is held.
#[derive(Actionlike, PartialEq, Eq, Clone, Copy, Hash, Debug, Reflect)]
pub enum LauncherAction {
    /// Nudge the hovered slider down.
    StepDown,
    /// Nudge the hovered slider up.
    StepUp,
    /// Close the top popup.
    Dismiss,
}

impl LauncherAction {
    fn default_input_map() -> InputMap<Self> {
        use LauncherAction::*;
        let mut map = InputMap::default();

        map.insert(StepDown, KeyCode::ArrowLeft);
        map.insert(StepUp, KeyCode::ArrowRight);
        map.insert(Dismiss, KeyCode::Escape);

        // Gamepad d-pad
        map.insert(StepDown, GamepadButton::DPadLeft);
        map.insert(StepUp, GamepadButton::DPadRight);
        map.insert(Dismiss, GamepadButton::East);

        map
    }
}
