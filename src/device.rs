//! Device and theme descriptor, resolved once at widget construction.
//!
//! Widgets never inspect the environment themselves: the host builds a
//! [`DeviceDescriptor`] (usually from `config.yaml`) and the default-option
//! rules below turn it into concrete option values.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    #[default]
    Desktop,
    Tablet,
    Phone,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Generic,
    Ios,
    Android,
}

fn default_theme() -> String {
    "generic.light".to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DeviceDescriptor {
    #[serde(default)]
    pub device_type: DeviceType,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub simulator: bool,
    #[serde(default = "default_theme")]
    pub theme: String,
}

impl Default for DeviceDescriptor {
    fn default() -> Self {
        DeviceDescriptor {
            device_type: DeviceType::Desktop,
            platform: Platform::Generic,
            simulator: false,
            theme: default_theme(),
        }
    }
}

/// How the navigator hosts its calendar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayKind {
    /// Anchored to the caption button.
    Popover,
    /// Full screen with a cancel toolbar item and no close button.
    FullScreenPopup,
}

impl DeviceDescriptor {
    pub fn is_generic(&self) -> bool {
        self.platform == Platform::Generic
    }

    pub fn is_real_desktop(&self) -> bool {
        self.device_type == DeviceType::Desktop && !self.simulator
    }

    /// Navigator: touch platforms and simulators get abbreviated month names.
    pub fn use_short_date_format(&self) -> bool {
        !self.is_generic() || self.simulator
    }

    pub fn overlay_kind(&self) -> OverlayKind {
        if self.is_generic() {
            OverlayKind::Popover
        } else {
            OverlayKind::FullScreenPopup
        }
    }

    /// Keyboard focus handling is on for real desktops only.
    pub fn focus_state_enabled(&self) -> bool {
        self.is_real_desktop()
    }

    /// Radio button: Material (android5) themes draw an ink ripple.
    pub fn use_ink_ripple(&self) -> bool {
        self.theme.contains("android5")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_descriptor_is_generic_desktop() {
        let device = DeviceDescriptor::default();
        assert!(device.is_generic());
        assert!(device.focus_state_enabled());
        assert!(!device.use_short_date_format());
        assert!(!device.use_ink_ripple());
        assert_eq!(device.overlay_kind(), OverlayKind::Popover);
    }

    #[test]
    fn test_simulator_uses_short_format_without_focus() {
        let device = DeviceDescriptor {
            simulator: true,
            ..DeviceDescriptor::default()
        };
        assert!(device.use_short_date_format());
        assert!(!device.focus_state_enabled());
    }

    #[test]
    fn test_phone_gets_full_screen_popup() {
        let device = DeviceDescriptor {
            device_type: DeviceType::Phone,
            platform: Platform::Ios,
            ..DeviceDescriptor::default()
        };
        assert_eq!(device.overlay_kind(), OverlayKind::FullScreenPopup);
        assert!(device.use_short_date_format());
        assert!(!device.focus_state_enabled());
    }

    #[test]
    fn test_android5_theme_enables_ink_ripple() {
        let device = DeviceDescriptor {
            theme: "android5.light".to_string(),
            ..DeviceDescriptor::default()
        };
        assert!(device.use_ink_ripple());
    }

    #[test]
    fn test_descriptor_yaml_defaults() {
        let device: DeviceDescriptor = serde_norway::from_str("platform: android").unwrap();
        assert_eq!(device.platform, Platform::Android);
        assert_eq!(device.device_type, DeviceType::Desktop);
        assert_eq!(device.theme, "generic.light");
    }
}
