//! ShadCN-style reusable UI components.
//!
//! - [`Button`]: Clickable button with variants
//! - [`Card`], [`CardHeader`], [`CardContent`]: Card container
//! - [`RoleBadge`]: Role tag
//! - icons: inline SVG icons

mod badge;
mod button;
mod card;
mod icons;

pub use badge::RoleBadge;
pub use button::{Button, ButtonSize, ButtonVariant, button_classes};
pub use card::{Card, CardContent, CardHeader};
pub use icons::*;
