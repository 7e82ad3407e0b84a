//! Select widget controller
//!
//! Orchestrates the option store, selection, filter and cursor in response
//! to input events and programmatic calls, and exposes a [`Projection`] for
//! the presentation layer.
//!
//! # State machine
//!
//! ```text
//!             control click / Enter / Space / Up / Down
//!   Closed ───────────────────────────────────────────────► Open
//!     ▲                                                       │
//!     └───────────────────────────────────────────────────────┘
//!       control click / Escape / outside click / option click /
//!       Enter or Space on the focused option
//! ```
//!
//! Opening resets the search and seeds the cursor from the first selected
//! option. Every selection mutation emits a [`ChangeEvent`].
//!
//! # Example
//!
//! ```
//! use blinc_select::prelude::*;
//!
//! let native = NativeSelect::new([
//!     NativeOption::new("Apple", "apple"),
//!     NativeOption::new("Banana", "banana"),
//! ]);
//! let mut host = ListenerRegistry::new();
//! let mut select = SelectWidget::new(&native, SelectConfig::default(), &mut host);
//!
//! select.handle_event(SelectEvent::KeyDown(key_codes::DOWN));
//! select.handle_event(SelectEvent::KeyDown(key_codes::DOWN));
//! select.handle_event(SelectEvent::KeyDown(key_codes::ENTER));
//!
//! assert_eq!(select.display(), SelectionDisplay::Single("Apple".into()));
//! assert!(!select.is_open());
//! ```

use crate::config::SelectConfig;
use crate::cursor::{Direction, NavigationCursor};
use crate::events::{EventOutcome, NavKey, SelectEvent};
use crate::filter::FilterEngine;
use crate::native::{ChangeEvent, ListenerId, NativeControl, OutsideClickHost};
use crate::projection::{ProjectedOption, Projection};
use crate::selection::{SelectionDisplay, SelectionModel};
use crate::store::{OptionId, OptionStore, SelectOption};

/// Open/closed state of the dropdown
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DropdownState {
    #[default]
    Closed,
    Open,
}

impl DropdownState {
    pub fn is_open(self) -> bool {
        self == DropdownState::Open
    }

    /// The state after a control click
    pub fn toggled(self) -> Self {
        match self {
            DropdownState::Closed => DropdownState::Open,
            DropdownState::Open => DropdownState::Closed,
        }
    }
}

/// Change callback
pub type ChangeCallback = Box<dyn FnMut(&ChangeEvent)>;

/// A select widget mirroring a native control
pub struct SelectWidget {
    config: SelectConfig,
    placeholder: String,
    multiple: bool,
    class: Option<String>,
    disabled: bool,
    destroyed: bool,
    state: DropdownState,
    store: OptionStore,
    selection: SelectionModel,
    filter: FilterEngine,
    cursor: NavigationCursor,
    /// Outside-click subscription granted by the host
    listener: Option<ListenerId>,
    on_change: Vec<ChangeCallback>,
    /// Latest change not yet taken by the host
    pending_change: Option<ChangeEvent>,
}

impl std::fmt::Debug for SelectWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectWidget")
            .field("state", &self.state)
            .field("multiple", &self.multiple)
            .field("disabled", &self.disabled)
            .field("destroyed", &self.destroyed)
            .field("options", &self.store.len())
            .field("selected", &self.selection.len())
            .field("focused", &self.cursor.focused())
            .field("on_change", &self.on_change.len())
            .finish()
    }
}

impl SelectWidget {
    /// Build a widget for `native`
    ///
    /// Options come from `config.data` when set, otherwise they are extracted
    /// from the native control together with their selected/disabled flags.
    /// An invalid `config` is logged and used as is; hosts that need to reject
    /// it call [`SelectConfig::validate`] first.
    /// The outside-click subscription is registered with `host` here and
    /// released by [`destroy`](Self::destroy).
    pub fn new(
        native: &dyn NativeControl,
        config: SelectConfig,
        host: &mut dyn OutsideClickHost,
    ) -> Self {
        let attributes = native.attributes();
        let store = match &config.data {
            Some(data) => OptionStore::from_data(data.iter().cloned()),
            None => OptionStore::from_native(native.options()),
        };
        if let Err(err) = config.validate() {
            tracing::warn!("Select config rejected: {}", err);
        }
        let selection = SelectionModel::from_store(&store, attributes.multiple);
        let placeholder = config.resolve_placeholder(attributes.placeholder.as_deref());

        tracing::debug!(
            "Select created: {} options, multiple: {}, disabled: {}, searchable: {}",
            store.len(),
            attributes.multiple,
            attributes.disabled,
            config.searchable
        );

        Self {
            config,
            placeholder,
            multiple: attributes.multiple,
            class: attributes.class,
            disabled: attributes.disabled,
            destroyed: false,
            state: DropdownState::Closed,
            store,
            selection,
            filter: FilterEngine::new(),
            cursor: NavigationCursor::new(),
            listener: Some(host.subscribe()),
            on_change: Vec::new(),
            pending_change: None,
        }
    }

    /// Register a change callback
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&ChangeEvent) + 'static,
    {
        self.on_change.push(Box::new(callback));
        self
    }

    // =========================================================================
    // Input events
    // =========================================================================

    /// Handle one input event to completion
    pub fn handle_event(&mut self, event: SelectEvent) -> EventOutcome {
        if self.destroyed {
            return EventOutcome::Ignored;
        }
        // A disabled widget still lets go of an open dropdown
        if self.disabled && event != SelectEvent::OutsideClick {
            return EventOutcome::Ignored;
        }

        match event {
            SelectEvent::ControlClick => {
                self.toggle();
                EventOutcome::Changed
            }
            SelectEvent::OptionClick(id) => self.click_option(id),
            SelectEvent::OutsideClick => {
                if self.state.is_open() {
                    self.close();
                    EventOutcome::Changed
                } else {
                    EventOutcome::Unchanged
                }
            }
            SelectEvent::KeyDown(code) => self.key_down(code),
            SelectEvent::SearchInput(text) => self.search(&text),
        }
    }

    fn toggle(&mut self) {
        match self.state.toggled() {
            DropdownState::Open => self.open(),
            DropdownState::Closed => self.close(),
        }
    }

    fn open(&mut self) {
        self.state = DropdownState::Open;
        self.filter.reset();
        let first_selected = self
            .store
            .ids()
            .iter()
            .copied()
            .find(|&id| {
                self.selection.is_selected(id)
                    && NavigationCursor::qualifies(&self.store, &self.filter, id)
            });
        self.cursor.seed(first_selected);
        tracing::debug!("Select opened, focus: {:?}", first_selected);
    }

    fn close(&mut self) {
        self.state = DropdownState::Closed;
        tracing::debug!("Select closed");
    }

    fn click_option(&mut self, id: OptionId) -> EventOutcome {
        if !self.state.is_open() || !self.filter.is_visible(id) {
            return EventOutcome::Unchanged;
        }
        if !self.selection.select(&self.store, id) {
            tracing::debug!("Select ignored click on unavailable option {:?}", id);
            return EventOutcome::Unchanged;
        }
        self.emit_change();
        self.close();
        EventOutcome::Changed
    }

    fn key_down(&mut self, code: u32) -> EventOutcome {
        let Some(key) = NavKey::from_code(code) else {
            return EventOutcome::Unchanged;
        };
        let open = self.state.is_open();

        match key {
            NavKey::Activate | NavKey::Up | NavKey::Down if !open => {
                self.open();
                EventOutcome::Changed
            }
            NavKey::Activate => self.activate(),
            NavKey::Down => EventOutcome::from_changed(self.advance(Direction::Next)),
            NavKey::Up => EventOutcome::from_changed(self.advance(Direction::Previous)),
            NavKey::Escape if open => {
                self.close();
                EventOutcome::Changed
            }
            NavKey::Escape => EventOutcome::Unchanged,
        }
    }

    fn advance(&mut self, direction: Direction) -> bool {
        self.cursor.advance(&self.store, &self.filter, direction)
    }

    /// Treat the focused option as clicked; with nothing focused just close
    fn activate(&mut self) -> EventOutcome {
        match self.cursor.focused() {
            Some(id) => self.click_option(id),
            None => {
                self.close();
                EventOutcome::Changed
            }
        }
    }

    fn search(&mut self, text: &str) -> EventOutcome {
        if !self.config.searchable {
            return EventOutcome::Unchanged;
        }
        self.filter.set_query(&self.store, text, self.state.is_open());
        self.cursor.reset_to_first(&self.store, &self.filter);
        EventOutcome::Changed
    }

    fn emit_change(&mut self) {
        let change = ChangeEvent {
            values: self.selection.values(&self.store),
            multiple: self.multiple,
        };
        tracing::debug!("Select change: {:?}", change.values);
        for callback in &mut self.on_change {
            callback(&change);
        }
        self.pending_change = Some(change);
    }

    // =========================================================================
    // Programmatic API
    // =========================================================================

    /// Ignore clicks and keys until [`enable`](Self::enable)
    pub fn disable(&mut self) {
        if !self.disabled {
            self.disabled = true;
            tracing::debug!("Select disabled");
        }
    }

    pub fn enable(&mut self) {
        if self.disabled {
            self.disabled = false;
            tracing::debug!("Select enabled");
        }
    }

    /// Deselect everything, including disabled options selected by default
    pub fn clear(&mut self) {
        if self.destroyed {
            return;
        }
        self.selection.clear();
        self.emit_change();
    }

    /// Re-extract options from the native control and rebuild derived state
    ///
    /// Keeps the widget in sync after the native control changed out-of-band.
    /// The open/closed state survives the rebuild. Ids issued before the
    /// reload become stale.
    pub fn reload(&mut self, native: &dyn NativeControl) {
        if self.destroyed {
            return;
        }
        let was_open = self.state.is_open();

        self.store
            .replace(native.options().into_iter().map(SelectOption::from));
        self.selection = SelectionModel::from_store(&self.store, self.multiple);
        self.filter.reset();
        self.cursor.clear();
        self.state = DropdownState::Closed;

        tracing::debug!(
            "Select reloaded: {} options, {} selected",
            self.store.len(),
            self.selection.len()
        );

        if was_open {
            self.open();
        }
    }

    /// Tear the widget down; it ignores everything afterwards
    pub fn destroy(&mut self, host: &mut dyn OutsideClickHost) {
        if self.destroyed {
            return;
        }
        if let Some(listener) = self.listener.take() {
            host.unsubscribe(listener);
        }
        self.store.replace(std::iter::empty());
        self.selection.clear();
        self.filter.reset();
        self.cursor.clear();
        self.state = DropdownState::Closed;
        self.on_change.clear();
        self.pending_change = None;
        self.destroyed = true;
        tracing::debug!("Select destroyed");
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Snapshot for rendering; `None` once destroyed
    pub fn projection(&self) -> Option<Projection> {
        if self.destroyed {
            return None;
        }
        let options = self
            .store
            .iter()
            .filter(|(id, _)| self.filter.is_visible(*id))
            .map(|(id, option)| ProjectedOption {
                id,
                text: option.text.clone(),
                value: option.value.clone(),
                selected: self.selection.is_selected(id),
                disabled: option.disabled,
                focused: self.cursor.is_focused(id),
            })
            .collect();

        Some(Projection {
            open: self.state.is_open(),
            disabled: self.disabled,
            multiple: self.multiple,
            searchable: self.config.searchable,
            query: self.filter.query().to_string(),
            class: self.class.clone(),
            display: self.display(),
            options,
        })
    }

    /// Placeholder or selected label(s)
    pub fn display(&self) -> SelectionDisplay {
        self.selection.projection(&self.store, &self.placeholder)
    }

    /// Take the latest change for applying to the native control
    pub fn take_change(&mut self) -> Option<ChangeEvent> {
        self.pending_change.take()
    }

    /// Selected values in selection order
    pub fn values(&self) -> Vec<String> {
        self.selection.values(&self.store)
    }

    pub fn state(&self) -> DropdownState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// The outside-click subscription, for hosts routing clicks
    pub fn listener(&self) -> Option<ListenerId> {
        self.listener
    }

    pub fn store(&self) -> &OptionStore {
        &self.store
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    /// The option holding keyboard focus
    pub fn focused(&self) -> Option<OptionId> {
        self.cursor.focused()
    }

    /// Resolve a rendered option's value to its id
    pub fn option_id(&self, value: &str) -> Option<OptionId> {
        self.store.find_by_value(value)
    }
}
