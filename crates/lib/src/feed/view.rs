//! Rendering surfaces for the live list. Rows are a pure projection of the feed; views only draw them.

use super::item::{truncate_address, FeedItem};
use std::io::Write;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

const COL_RECIPIENT: usize = 28;
const COL_SENDER: usize = 28;
const COL_SUBJECT: usize = 40;
const COL_RECEIVED: usize = 19;

/// Display options applied when projecting items to rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Show only the local part of addresses.
    pub truncate_addresses: bool,
}

/// One visible row. `link` is the detail path for the item (`/inbox/{id}`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRow {
    pub id: String,
    pub recipient: String,
    pub sender: String,
    pub subject: String,
    pub received_at: String,
    pub link: String,
}

impl FeedRow {
    pub fn from_item(item: &FeedItem, options: RenderOptions) -> Self {
        let address = |a: &str| {
            if options.truncate_addresses {
                truncate_address(a).to_string()
            } else {
                a.to_string()
            }
        };
        Self {
            id: item.id.clone(),
            recipient: address(&item.recipient),
            sender: address(&item.sender),
            subject: item.subject.clone(),
            received_at: item.received_display(),
            link: detail_link(&item.id),
        }
    }
}

/// Navigation target for an item's detail view.
pub fn detail_link(id: &str) -> String {
    format!("/inbox/{}", id)
}

/// Surface that shows the current rows. Called with the full list, newest first, after every accepted item.
pub trait FeedView {
    fn draw(&mut self, rows: &[FeedRow]);
}

/// Keeps the last drawn frame in memory (for tests and embedding in other front ends).
#[derive(Debug, Default)]
pub struct RecordingView {
    pub frame: Vec<FeedRow>,
    pub draws: usize,
}

impl FeedView for RecordingView {
    fn draw(&mut self, rows: &[FeedRow]) {
        self.frame = rows.to_vec();
        self.draws += 1;
    }
}

/// Fixed-width text table on any writer (normally stdout).
pub struct TerminalView<W: Write> {
    out: W,
    clear_screen: bool,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, clear_screen: bool) -> Self {
        Self { out, clear_screen }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_frame(&mut self, rows: &[FeedRow]) -> std::io::Result<()> {
        if self.clear_screen {
            write!(self.out, "{}", CLEAR_SCREEN)?;
        }
        writeln!(
            self.out,
            "{} {} {} {} LINK",
            fit("RECIPIENT", COL_RECIPIENT),
            fit("SENDER", COL_SENDER),
            fit("SUBJECT", COL_SUBJECT),
            fit("RECEIVED", COL_RECEIVED),
        )?;
        for row in rows {
            writeln!(
                self.out,
                "{} {} {} {} {}",
                fit(&row.recipient, COL_RECIPIENT),
                fit(&row.sender, COL_SENDER),
                fit(&row.subject, COL_SUBJECT),
                fit(&row.received_at, COL_RECEIVED),
                row.link,
            )?;
        }
        self.out.flush()
    }
}

impl<W: Write> FeedView for TerminalView<W> {
    fn draw(&mut self, rows: &[FeedRow]) {
        if let Err(e) = self.write_frame(rows) {
            log::warn!("terminal view: write failed: {}", e);
        }
    }
}

/// Pad or cut `s` to exactly `width` characters; cut text ends with `~`.
fn fit(s: &str, width: usize) -> String {
    let s = s.replace(['\r', '\n', '\t'], " ");
    let len = s.chars().count();
    if len <= width {
        format!("{}{}", s, " ".repeat(width - len))
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('~');
        out
    }
}
