pub mod binding;
pub mod button;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod hand;
pub mod input;
pub mod inspector;
pub mod layout;
pub mod mesh;
pub mod observable;
pub mod scene;
pub mod tick;

pub use binding::*;
pub use button::*;
pub use constants::*;
pub use controller::*;
pub use error::*;
pub use hand::*;
pub use input::*;
pub use layout::*;
pub use observable::*;
pub use scene::*;
