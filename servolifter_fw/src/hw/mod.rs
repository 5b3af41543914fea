// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

pub mod button;
pub mod delay;
pub mod indicator;
pub mod pins;
pub mod servo_pwm;
pub mod usart;

pub use button::SafetyButton;
pub use delay::CycleDelay;
pub use indicator::Indicator;
pub use pins::BoardPins;
pub use servo_pwm::{PwmOutputs, ServoTimers};
pub use usart::{BannerPort, SerialLink};
