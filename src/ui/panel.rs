// src/ui/panel.rs
//! Control surface for the solar system viewer
//!
//! One speed slider per planet, a theme toggle, and the hover tooltip. All
//! controls are immediate-effect: sliders write the speed vector the
//! simulator reads next frame, and the theme only selects the clear color.
//! Nothing here rebuilds the scene.

use crate::registry::{BodyDef, MAX_ANGULAR_SPEED, PLANETS};

/// Background theme. Changes the clear color and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn background(self) -> wgpu::Color {
        match self {
            Theme::Dark => wgpu::Color::BLACK,
            Theme::Light => wgpu::Color::WHITE,
        }
    }

    /// Button label: names the mode the toggle switches to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Dark => "Light Mode",
            Theme::Light => "Dark Mode",
        }
    }
}

/// User-owned control state: the per-planet speed vector and the theme.
pub struct ControlState {
    /// Radians per frame, indexed like the registry.
    pub speeds: Vec<f32>,
    pub theme: Theme,
}

impl ControlState {
    pub fn new(bodies: &[BodyDef]) -> Self {
        Self {
            speeds: bodies.iter().map(|b| b.angular_speed).collect(),
            theme: Theme::Dark,
        }
    }

    pub fn reset_speeds(&mut self, bodies: &[BodyDef]) {
        for (speed, body) in self.speeds.iter_mut().zip(bodies) {
            *speed = body.angular_speed;
        }
    }

    pub fn clamp_speeds(&mut self) {
        for speed in &mut self.speeds {
            *speed = speed.clamp(0.0, MAX_ANGULAR_SPEED);
        }
    }
}

/// Draws the speed sliders and theme toggle.
pub fn control_panel(ui: &imgui::Ui, controls: &mut ControlState) {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return;
    }

    ui.window("Planet Speed Control")
        .size([320.0, 440.0], imgui::Condition::FirstUseEver)
        .position(
            [display_size[0] - 340.0, 20.0],
            imgui::Condition::FirstUseEver,
        )
        .build(|| {
            if ui.button(controls.theme.toggle_label()) {
                controls.theme = controls.theme.toggled();
            }
            ui.separator();

            ui.text("Orbital speed (radians per frame)");
            ui.spacing();

            for (i, body) in PLANETS.iter().enumerate() {
                ui.slider_config(body.name, 0.0, MAX_ANGULAR_SPEED)
                    .display_format("%.3f")
                    .build(&mut controls.speeds[i]);
            }
            controls.clamp_speeds();

            ui.spacing();
            if ui.button("Reset Speeds") {
                controls.reset_speeds(&PLANETS);
            }
        });
}

/// Draws the planet-name tooltip next to the cursor.
pub fn hover_tooltip(ui: &imgui::Ui, name: &str, cursor: (f32, f32)) {
    ui.window("##planet_tooltip")
        .position([cursor.0 + 12.0, cursor.1 + 12.0], imgui::Condition::Always)
        .flags(
            imgui::WindowFlags::NO_DECORATION
                | imgui::WindowFlags::NO_MOVE
                | imgui::WindowFlags::NO_INPUTS
                | imgui::WindowFlags::ALWAYS_AUTO_RESIZE
                | imgui::WindowFlags::NO_FOCUS_ON_APPEARING
                | imgui::WindowFlags::NO_NAV,
        )
        .build(|| {
            ui.text(name);
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_toggle_round_trips() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn test_theme_only_selects_background() {
        assert_eq!(Theme::Dark.background(), wgpu::Color::BLACK);
        assert_eq!(Theme::Light.background(), wgpu::Color::WHITE);
    }

    #[test]
    fn test_theme_toggle_leaves_speeds_alone() {
        let mut controls = ControlState::new(&PLANETS);
        let before = controls.speeds.clone();
        controls.theme = controls.theme.toggled();
        assert_eq!(controls.speeds, before);
    }

    #[test]
    fn test_speeds_default_from_registry_and_clamp() {
        let mut controls = ControlState::new(&PLANETS);
        assert_eq!(controls.speeds.len(), PLANETS.len());
        assert_eq!(controls.speeds[2], PLANETS[2].angular_speed);

        controls.speeds[0] = 7.0;
        controls.speeds[1] = -3.0;
        controls.clamp_speeds();
        assert_eq!(controls.speeds[0], MAX_ANGULAR_SPEED);
        assert_eq!(controls.speeds[1], 0.0);

        controls.reset_speeds(&PLANETS);
        assert_eq!(controls.speeds[0], PLANETS[0].angular_speed);
    }
}
