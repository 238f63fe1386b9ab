//! Shared style sheet.
//!
//! Every widget in the process renders with one [`StyleSheet`]. It is created
//! when the first [`StyleLease`] is acquired, from that widget's theme, and
//! removed when the last lease is released. Later widgets reuse it as-is.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use ratatui::style::{Color, Modifier, Style};

use crate::theme::Palette;

// ============================================================================
// Style Sheet
// ============================================================================

/// Resolved styles for every widget element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSheet {
    pub palette: Palette,
    pub border_focused: Style,
    pub preset: Style,
    pub preset_selected: Style,
    pub preset_cursor: Style,
    pub input: Style,
    pub input_focused: Style,
    pub input_error: Style,
    pub button: Style,
    pub button_focused: Style,
    pub button_busy: Style,
    pub balance_amount: Style,
    pub success_banner: Style,
    pub error_banner: Style,
}

impl StyleSheet {
    #[must_use]
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            border_focused: Style::new().fg(palette.primary),
            preset: Style::new().fg(Color::White),
            preset_selected: Style::new()
                .fg(Color::White)
                .bg(palette.primary)
                .add_modifier(Modifier::BOLD),
            preset_cursor: Style::new()
                .fg(palette.primary)
                .add_modifier(Modifier::UNDERLINED),
            input: Style::new().fg(Color::White),
            input_focused: Style::new().fg(palette.primary),
            input_error: Style::new().fg(palette.error),
            button: Style::new().fg(Color::White).bg(palette.primary),
            button_focused: Style::new()
                .fg(Color::White)
                .bg(palette.primary_dark)
                .add_modifier(Modifier::BOLD),
            button_busy: Style::new().fg(Color::Gray).bg(Color::DarkGray),
            balance_amount: Style::new()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
            success_banner: Style::new()
                .fg(palette.success)
                .add_modifier(Modifier::BOLD),
            error_banner: Style::new()
                .fg(palette.error)
                .add_modifier(Modifier::BOLD),
        }
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}

// ============================================================================
// Registry
// ============================================================================

#[derive(Debug)]
struct Installed {
    sheet: Arc<StyleSheet>,
    leases: usize,
}

/// Reference-counted holder of an installed style sheet.
#[derive(Debug, Default)]
pub struct StyleRegistry {
    installed: Mutex<Option<Installed>>,
}

static GLOBAL: StyleRegistry = StyleRegistry::new();

impl StyleRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            installed: Mutex::new(None),
        }
    }

    /// The process-wide registry used by every widget.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    fn lock(&self) -> MutexGuard<'_, Option<Installed>> {
        self.installed.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a lease, installing a sheet built from `palette` if none exists.
    #[must_use]
    pub fn acquire(&'static self, palette: Palette) -> StyleLease {
        let mut guard = self.lock();
        let entry = guard.get_or_insert_with(|| {
            tracing::debug!("Installing shared style sheet");
            Installed {
                sheet: Arc::new(StyleSheet::new(palette)),
                leases: 0,
            }
        });
        entry.leases += 1;
        StyleLease {
            registry: self,
            sheet: Arc::clone(&entry.sheet),
        }
    }

    fn release(&self) {
        let mut installed = self.lock();
        let released_last = match installed.as_mut() {
            Some(entry) => {
                entry.leases = entry.leases.saturating_sub(1);
                entry.leases == 0
            }
            None => false,
        };
        if released_last {
            tracing::debug!("Removing shared style sheet");
            *installed = None;
        }
    }

    /// The installed sheet, if any lease is outstanding.
    #[must_use]
    pub fn installed(&self) -> Option<Arc<StyleSheet>> {
        self.lock().as_ref().map(|entry| Arc::clone(&entry.sheet))
    }

    #[must_use]
    pub fn lease_count(&self) -> usize {
        self.lock().as_ref().map_or(0, |entry| entry.leases)
    }
}

// ============================================================================
// Lease
// ============================================================================

/// A counted reference to an installed style sheet.
///
/// Dropping the last lease uninstalls the sheet.
#[derive(Debug)]
pub struct StyleLease {
    registry: &'static StyleRegistry,
    sheet: Arc<StyleSheet>,
}

impl StyleLease {
    /// Takes a lease on the process-wide sheet.
    #[must_use]
    pub fn acquire(palette: Palette) -> Self {
        StyleRegistry::global().acquire(palette)
    }

    #[must_use]
    pub fn sheet(&self) -> &Arc<StyleSheet> {
        &self.sheet
    }
}

impl Drop for StyleLease {
    fn drop(&mut self) {
        self.registry.release();
    }
}

// ============================================================================
// Tests
// ============================================================================
