//! Nested list construction from flat list lines.

use std::collections::BTreeMap;

use crate::model::{InlineContent, List, ListItem, ListKind};

/// One list line after segmentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ListEntry {
    pub kind: ListKind,
    pub level: usize,
    pub content: Vec<InlineContent>,
}

/// Next ordinal per nesting level.
///
/// Lives for one message so that an ordered list interrupted by a
/// paragraph resumes its numbering instead of restarting at 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListCounters {
    next: BTreeMap<usize, u32>,
}

impl ListCounters {
    /// Create an empty set of counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Next ordinal recorded for `level`, if any.
    pub fn get(&self, level: usize) -> Option<u32> {
        self.next.get(&level).copied()
    }

    /// Check if no level has been numbered yet.
    pub fn is_empty(&self) -> bool {
        self.next.is_empty()
    }

    /// Open an ordered list at `level`, returning the start offset when
    /// numbering continues from an earlier list.
    fn open(&mut self, level: usize) -> Option<u32> {
        match self.next.get(&level) {
            Some(&next) if next > 1 => Some(next),
            Some(_) => None,
            None => {
                self.next.insert(level, 1);
                None
            }
        }
    }

    fn advance(&mut self, level: usize) {
        *self.next.entry(level).or_insert(1) += 1;
    }

    fn discard(&mut self, level: usize) {
        self.next.remove(&level);
    }
}

struct OpenList {
    list: List,
    level: usize,
}

/// Build nested lists from one run of list lines.
///
/// The stack of open lists always holds exactly `level + 1` entries once
/// an item has been placed. Leaving a deeper level discards that level's
/// counter; switching kind at the same level keeps it.
pub(crate) fn build_lists(entries: Vec<ListEntry>, counters: &mut ListCounters) -> Vec<List> {
    let mut output = Vec::new();
    let mut stack: Vec<OpenList> = Vec::new();

    for entry in entries {
        match stack.last().map(|open| open.level) {
            None => open_levels(&mut stack, 0, entry.level, entry.kind, counters),
            Some(last) if entry.level > last => {
                open_levels(&mut stack, last + 1, entry.level, entry.kind, counters)
            }
            Some(last) if entry.level < last => {
                for _ in entry.level..last {
                    if let Some(closed) = stack.pop() {
                        counters.discard(closed.level);
                        attach(&mut stack, &mut output, closed.list);
                    }
                }
            }
            Some(_) => {}
        }

        if stack.last().is_some_and(|top| top.list.kind != entry.kind) {
            if let Some(closed) = stack.pop() {
                attach(&mut stack, &mut output, closed.list);
            }
            open_levels(&mut stack, entry.level, entry.level, entry.kind, counters);
        }

        debug_assert_eq!(stack.len(), entry.level + 1);

        if let Some(top) = stack.last_mut() {
            top.list.items.push(ListItem::new(entry.content));
        }
        if entry.kind.is_ordered() {
            counters.advance(entry.level);
        }
    }

    while let Some(closed) = stack.pop() {
        attach(&mut stack, &mut output, closed.list);
    }

    log::debug!("Built {} top-level list(s)", output.len());
    output
}

fn open_levels(
    stack: &mut Vec<OpenList>,
    from: usize,
    to: usize,
    kind: ListKind,
    counters: &mut ListCounters,
) {
    for level in from..=to {
        let list = match kind {
            ListKind::Ordered => match counters.open(level) {
                Some(start) => List::continuing(start),
                None => List::new(ListKind::Ordered),
            },
            ListKind::Unordered => List::new(ListKind::Unordered),
        };
        stack.push(OpenList { list, level });
    }
}

/// Attach a closed list to the last item of its parent, or to the output
/// when it was a top-level list. A parent without items gets an empty
/// carrier item.
fn attach(stack: &mut [OpenList], output: &mut Vec<List>, list: List) {
    match stack.last_mut() {
        Some(parent) => {
            let items = &mut parent.list.items;
            if items.is_empty() {
                items.push(ListItem::default());
            }
            if let Some(item) = items.last_mut() {
                item.children.push(list);
            }
        }
        None => output.push(list),
    }
}
