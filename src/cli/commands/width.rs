//! # Width Command Module / 宽度命令模块
//!
//! Reads or updates the persisted tree-panel width, applying the same
//! clamping and step rules as the interactive resizer.
//!
//! 读取或更新持久化的树面板宽度，应用与交互式调整器相同的限制和步长规则。

use anyhow::Result;
use colored::*;

use crate::infra::config::{ViewerConfig, expand_path};
use crate::infra::prefs::{
    Nudge, PrefStore, clamp_width, drag_width, nudge_width, panel_width_or_default,
    save_panel_width,
};
use crate::infra::t;

/// What to do with the stored width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthAction {
    Show,
    Set(i64),
    Nudge { right: bool, shift: bool },
    /// Drag the resizer from `start_x` to `x`, starting at the stored width.
    Drag { start_x: i64, x: i64 },
}

pub fn execute(config: &ViewerConfig, action: WidthAction, locale: &str) -> Result<()> {
    let mut store = PrefStore::open(expand_path(&config.prefs.path));
    let current = panel_width_or_default(&store);

    let updated = match action {
        WidthAction::Show => None,
        WidthAction::Set(px) => Some(clamp_width(px)),
        WidthAction::Nudge { right, shift } => {
            let direction = if right { Nudge::Right } else { Nudge::Left };
            Some(nudge_width(current, direction, shift))
        }
        WidthAction::Drag { start_x, x } => Some(drag_width(current, start_x, x)),
    };

    let width = match updated {
        Some(px) => {
            save_panel_width(&mut store, px);
            px
        }
        None => current,
    };

    println!(
        "{}",
        t!("width.current", locale = locale, px = width).cyan()
    );
    Ok(())
}
