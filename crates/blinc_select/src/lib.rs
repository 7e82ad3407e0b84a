//! Blinc Select
//!
//! Headless state machine for select widgets that mirror a native choice
//! list. Rendering is left to the host; this crate owns the state:
//!
//! - **Option Store**: ordered options addressed by stable [`OptionId`] handles
//! - **Selection Model**: single or multiple selection with change notifications
//! - **Filter Engine**: case-insensitive search over option labels
//! - **Navigation Cursor**: keyboard focus that skips disabled and hidden options
//! - **Select Widget**: the open/closed controller tying them together
//!
//! The native control stays the source of truth for the option list. The
//! widget reads it on construction and [`SelectWidget::reload`], and reports
//! every selection change outward as a [`ChangeEvent`].
//!
//! # Example
//!
//! ```rust
//! use blinc_select::prelude::*;
//!
//! let native = NativeSelect::new([
//!     NativeOption::new("A", "v1"),
//!     NativeOption::new("B", "v2").disabled(),
//!     NativeOption::new("C", "v3"),
//! ])
//! .multiple(true);
//!
//! let mut host = ListenerRegistry::new();
//! let mut select = SelectWidget::new(&native, SelectConfig::default(), &mut host);
//!
//! for value in ["v1", "v3"] {
//!     let id = select.option_id(value).unwrap();
//!     select.handle_event(SelectEvent::ControlClick);
//!     select.handle_event(SelectEvent::OptionClick(id));
//! }
//!
//! assert_eq!(
//!     select.display(),
//!     SelectionDisplay::Multiple(vec!["A".into(), "C".into()])
//! );
//! ```

pub mod config;
pub mod cursor;
pub mod error;
pub mod events;
pub mod filter;
pub mod native;
pub mod projection;
pub mod selection;
pub mod store;
pub mod widget;

pub use config::{SelectConfig, DEFAULT_PLACEHOLDER};
pub use cursor::{Direction, NavigationCursor};
pub use error::{Result, SelectError};
pub use events::{key_codes, EventOutcome, NavKey, SelectEvent};
pub use filter::FilterEngine;
pub use native::{
    ChangeEvent, ListenerId, ListenerRegistry, NativeAttributes, NativeControl, NativeOption,
    NativeSelect, OutsideClickHost,
};
pub use projection::{ProjectedOption, Projection};
pub use selection::{SelectionDisplay, SelectionModel};
pub use store::{OptionData, OptionId, OptionStore, SelectOption};
pub use widget::{ChangeCallback, DropdownState, SelectWidget};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::SelectConfig;
    pub use crate::events::{key_codes, EventOutcome, SelectEvent};
    pub use crate::native::{
        ChangeEvent, ListenerRegistry, NativeControl, NativeOption, NativeSelect,
        OutsideClickHost,
    };
    pub use crate::projection::{ProjectedOption, Projection};
    pub use crate::selection::SelectionDisplay;
    pub use crate::store::{OptionData, OptionId};
    pub use crate::widget::{DropdownState, SelectWidget};
}
