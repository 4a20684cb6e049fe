#![forbid(unsafe_code)]

//! Navigation surfaces.
//!
//! A [`FocusContext`] is the item set of one screen or mode, laid out on a
//! grid. Movement is row/column arithmetic only; there is no spatial search.
//!
//! # Invariants
//!
//! 1. Every item occupies a unique `(row, column)` cell.
//! 2. `rows()`/`columns()` match the layout after every mutation.
//! 3. Positions are 0-based here; [`FocusContext::item_position`] is the only
//!    1-based value and exists for spoken "N of M" suffixes.
//! 4. A refresh replaces the whole item collection; items are never patched.
//!
//! # Failure Modes
//!
//! | Situation | Behavior |
//! |-----------|----------|
//! | No current item, or unknown current id | Directional queries return `None` |
//! | Target cell empty or not focusable | Directional queries return the current item |
//! | No focusable items | `default_focus()` is `None`, summary says "is empty" |
//! | No item source | `refresh()` keeps the current items |
//!
//! Irregular layouts such as a short last row therefore refuse moves into
//! their empty cells.

use std::collections::HashSet;
use std::fmt;

use wayfinder_core::{GridPos, NavDirection};

use crate::item::{FocusableItem, ItemId};

/// How items are placed on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Single column; item `i` sits at row `i`.
    List,
    /// Row-major grid; item `i` sits at `(i / items_per_row, i % items_per_row)`.
    Grid { items_per_row: usize },
}

/// Produces a fresh item set from host state.
pub trait ItemSource {
    fn load(&mut self) -> Vec<Box<dyn FocusableItem>>;
}

impl<F> ItemSource for F
where
    F: FnMut() -> Vec<Box<dyn FocusableItem>>,
{
    fn load(&mut self) -> Vec<Box<dyn FocusableItem>> {
        self()
    }
}

type Hook = Box<dyn FnMut()>;

struct Slot {
    item: Box<dyn FocusableItem>,
    pos: GridPos,
}

/// The navigable item set of one screen or mode.
///
/// # Example
///
/// ```
/// use wayfinder_focus::{FocusContext, FocusItem};
///
/// let mut hand = FocusContext::grid("Hand", 3).with_wrap(false);
/// hand.set_items(
///     (0..6)
///         .map(|i| FocusItem::new(format!("card-{i}"), format!("Card {i}")).boxed())
///         .collect(),
/// );
///
/// assert_eq!((hand.rows(), hand.columns()), (2, 3));
/// assert_eq!(hand.item_right(Some("card-2")), Some("card-2"));
/// assert_eq!(hand.item_below(Some("card-2")), Some("card-5"));
/// ```
pub struct FocusContext {
    name: String,
    layout: Layout,
    wrap: bool,
    slots: Vec<Slot>,
    rows: usize,
    columns: usize,
    last_focus: Option<ItemId>,
    source: Option<Box<dyn ItemSource>>,
    back_handler: Option<Hook>,
    enter_hook: Option<Hook>,
    exit_hook: Option<Hook>,
}

impl fmt::Debug for FocusContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusContext")
            .field("name", &self.name)
            .field("layout", &self.layout)
            .field("wrap", &self.wrap)
            .field("items", &self.slots.len())
            .field("rows", &self.rows)
            .field("columns", &self.columns)
            .field("last_focus", &self.last_focus)
            .finish_non_exhaustive()
    }
}

impl FocusContext {
    fn with_layout(name: impl Into<String>, layout: Layout) -> Self {
        Self {
            name: name.into(),
            layout,
            wrap: true,
            slots: Vec::new(),
            rows: 0,
            columns: match layout {
                Layout::List => 1,
                Layout::Grid { .. } => 0,
            },
            last_focus: None,
            source: None,
            back_handler: None,
            enter_hook: None,
            exit_hook: None,
        }
    }

    /// Single-column context. Wraps by default.
    #[must_use]
    pub fn list(name: impl Into<String>) -> Self {
        Self::with_layout(name, Layout::List)
    }

    /// Row-major grid context. Wraps by default.
    ///
    /// `items_per_row` of zero is treated as one.
    #[must_use]
    pub fn grid(name: impl Into<String>, items_per_row: usize) -> Self {
        Self::with_layout(
            name,
            Layout::Grid {
                items_per_row: items_per_row.max(1),
            },
        )
    }

    #[must_use]
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// Builder: initial items (same as [`set_items`](Self::set_items)).
    #[must_use]
    pub fn with_items(mut self, items: Vec<Box<dyn FocusableItem>>) -> Self {
        self.set_items(items);
        self
    }

    /// Builder: where [`refresh`](Self::refresh) pulls items from.
    #[must_use]
    pub fn with_source(mut self, source: impl ItemSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Builder: what "back" does when there is no parent context.
    #[must_use]
    pub fn with_back_handler(mut self, handler: impl FnMut() + 'static) -> Self {
        self.back_handler = Some(Box::new(handler));
        self
    }

    /// Builder: runs on entry, before the refresh.
    #[must_use]
    pub fn with_enter_hook(mut self, hook: impl FnMut() + 'static) -> Self {
        self.enter_hook = Some(Box::new(hook));
        self
    }

    /// Builder: runs when the context is navigated away from.
    #[must_use]
    pub fn with_exit_hook(mut self, hook: impl FnMut() + 'static) -> Self {
        self.exit_hook = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    #[must_use]
    pub fn wraps(&self) -> bool {
        self.wrap
    }

    pub fn set_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of items, focusable or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Replace every item and lay them out again.
    pub fn set_items(&mut self, items: Vec<Box<dyn FocusableItem>>) {
        self.slots = items
            .into_iter()
            .map(|item| Slot {
                item,
                pos: GridPos::default(),
            })
            .collect();
        self.relayout();
    }

    /// Append one item at the end of the layout.
    pub fn add_item(&mut self, item: Box<dyn FocusableItem>) {
        self.slots.push(Slot {
            item,
            pos: GridPos::default(),
        });
        self.relayout();
    }

    /// Remove every item. The remembered focus is kept.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.relayout();
    }

    fn relayout(&mut self) {
        let count = self.slots.len();
        match self.layout {
            Layout::List => {
                for (index, slot) in self.slots.iter_mut().enumerate() {
                    slot.pos = GridPos::new(index, 0);
                }
                self.rows = count;
                self.columns = 1;
            }
            Layout::Grid { items_per_row } => {
                for (index, slot) in self.slots.iter_mut().enumerate() {
                    slot.pos = GridPos::new(index / items_per_row, index % items_per_row);
                }
                self.rows = count.div_ceil(items_per_row);
                self.columns = items_per_row.min(count);
            }
        }

        let mut seen = HashSet::with_capacity(count);
        for slot in &self.slots {
            if !seen.insert(slot.item.id()) {
                tracing::warn!(
                    context = %self.name,
                    id = slot.item.id(),
                    "duplicate item id; lookups resolve to the first"
                );
            }
        }
    }

    fn slot(&self, id: &str) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.item.id() == id)
    }

    /// Items in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &(dyn FocusableItem + 'static)> + '_ {
        self.slots.iter().map(|slot| slot.item.as_ref())
    }

    /// Focusable items in insertion order.
    pub fn focusable_items(&self) -> impl Iterator<Item = &(dyn FocusableItem + 'static)> + '_ {
        self.items().filter(|item| item.can_focus())
    }

    #[must_use]
    pub fn item(&self, id: &str) -> Option<&dyn FocusableItem> {
        self.slot(id).map(|slot| slot.item.as_ref())
    }

    pub fn item_mut(&mut self, id: &str) -> Option<&mut (dyn FocusableItem + 'static)> {
        self.slots
            .iter_mut()
            .find(|slot| slot.item.id() == id)
            .map(|slot| slot.item.as_mut())
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.slot(id).is_some()
    }

    /// Whether `id` is present and can take focus right now.
    #[must_use]
    pub fn can_focus(&self, id: &str) -> bool {
        self.item(id).is_some_and(|item| item.can_focus())
    }

    /// 0-based linear index of `id`.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.item.id() == id)
    }

    /// 0-based grid cell of `id`.
    #[must_use]
    pub fn position_of(&self, id: &str) -> Option<GridPos> {
        self.slot(id).map(|slot| slot.pos)
    }

    /// Focusable item occupying `pos`, if any.
    #[must_use]
    pub fn focusable_at(&self, pos: GridPos) -> Option<&dyn FocusableItem> {
        self.slots
            .iter()
            .find(|slot| slot.pos == pos && slot.item.can_focus())
            .map(|slot| slot.item.as_ref())
    }

    /// Item reached by moving one cell from `current` in `dir`.
    ///
    /// Returns `current` itself when the target cell holds nothing focusable.
    #[must_use]
    pub fn neighbor(&self, current: Option<&str>, dir: NavDirection) -> Option<&str> {
        let slot = self.slot(current?)?;
        let target = slot.pos.step(dir, self.rows, self.columns, self.wrap);
        match self.focusable_at(target) {
            Some(item) => Some(item.id()),
            None => Some(slot.item.id()),
        }
    }

    #[must_use]
    pub fn item_above(&self, current: Option<&str>) -> Option<&str> {
        self.neighbor(current, NavDirection::Up)
    }

    #[must_use]
    pub fn item_below(&self, current: Option<&str>) -> Option<&str> {
        self.neighbor(current, NavDirection::Down)
    }

    #[must_use]
    pub fn item_left(&self, current: Option<&str>) -> Option<&str> {
        self.neighbor(current, NavDirection::Left)
    }

    #[must_use]
    pub fn item_right(&self, current: Option<&str>) -> Option<&str> {
        self.neighbor(current, NavDirection::Right)
    }

    /// First focusable item in insertion order.
    #[must_use]
    pub fn first_focusable(&self) -> Option<&str> {
        self.focusable_items().next().map(|item| item.id())
    }

    /// Last focusable item in insertion order.
    #[must_use]
    pub fn last_focusable(&self) -> Option<&str> {
        self.focusable_items().last().map(|item| item.id())
    }

    /// Remembered focus if still usable, else the first focusable item.
    #[must_use]
    pub fn default_focus(&self) -> Option<&str> {
        self.last_focus
            .as_deref()
            .and_then(|id| self.item(id))
            .filter(|item| item.can_focus())
            .map(|item| item.id())
            .or_else(|| self.first_focusable())
    }

    /// Item focused when this context was last active.
    #[must_use]
    pub fn last_focus(&self) -> Option<&str> {
        self.last_focus.as_deref()
    }

    pub fn remember_focus(&mut self, id: impl Into<ItemId>) {
        self.last_focus = Some(id.into());
    }

    #[must_use]
    pub fn focusable_count(&self) -> usize {
        self.focusable_items().count()
    }

    /// 1-based rank of `id` among focusable items.
    ///
    /// `None` if the item is missing or cannot take focus.
    #[must_use]
    pub fn item_position(&self, id: &str) -> Option<usize> {
        self.focusable_items()
            .position(|item| item.id() == id)
            .map(|index| index + 1)
    }

    /// "Read everything" text, entries joined with `", "`.
    #[must_use]
    pub fn summary(&self) -> String {
        self.summary_with(", ")
    }

    /// "Read everything" text with a custom entry separator.
    #[must_use]
    pub fn summary_with(&self, separator: &str) -> String {
        let labels: Vec<String> = self
            .focusable_items()
            .enumerate()
            .map(|(index, item)| format!("{}. {}", index + 1, item.label()))
            .collect();
        match labels.len() {
            0 => format!("{} is empty", self.name),
            1 => format!("{}, 1 item: {}", self.name, labels[0]),
            n => format!("{}, {n} items: {}", self.name, labels.join(separator)),
        }
    }

    /// Reload items from the source. Without a source this is a no-op.
    pub fn refresh(&mut self) {
        let Some(source) = self.source.as_mut() else {
            return;
        };
        let items = source.load();
        self.set_items(items);
        tracing::trace!(context = %self.name, items = self.slots.len(), "context refreshed");
    }

    /// Called when the context becomes current. Always refreshes.
    pub fn on_enter(&mut self) {
        if let Some(hook) = self.enter_hook.as_mut() {
            hook();
        }
        self.refresh();
    }

    /// Called when the context stops being current.
    pub fn on_exit(&mut self) {
        if let Some(hook) = self.exit_hook.as_mut() {
            hook();
        }
    }

    /// Run the back handler. Returns whether one was installed.
    pub fn handle_back(&mut self) -> bool {
        match self.back_handler.as_mut() {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }
}
