//! Chain arena for provisional labeling records
//!
//! The labeling scan keeps every open component as a chain of nodes:
//!
//! - an `Object` node holds the first and last line of the component and
//!   the last node of its line chain;
//! - each `Line` node holds the last node of that line's interval chain;
//! - each `Interval` node holds one absolute column range.
//!
//! Line and interval chains are circular and are referenced by their last
//! node, so the first node is one `next` away and appending is O(1).
//! Interval chains are kept in ascending `left` order.
//!
//! Nodes live in one `Vec` and freed slots go on a free list of indices.
//! The arena belongs to a single labeling call and is dropped with it.

use log::trace;
use regionkit_core::{DomainBounds, Interval, IntervalDomain, IntervalLine, IntvlDomain};

use crate::error::RegionResult;

/// Index of a node in a [`ChainArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
enum Node {
    Free,
    Interval {
        next: NodeId,
        interval: Interval,
    },
    Line {
        next: NodeId,
        intervals: Option<NodeId>,
    },
    Object {
        first_line: i32,
        last_line: i32,
        lines: NodeId,
    },
}

/// Exact extent of a closed record, found by walking its chains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordExtent {
    /// First line holding an interval
    pub first_line: i32,
    /// Last line holding an interval
    pub last_line: i32,
    /// Leftmost column
    pub col1: i32,
    /// Rightmost column
    pub last_col: i32,
    /// Number of intervals
    pub intervals: usize,
}

impl RecordExtent {
    /// Number of lines spanned
    pub fn height(&self) -> i64 {
        i64::from(self.last_line) - i64::from(self.first_line) + 1
    }

    /// Number of columns spanned
    pub fn width(&self) -> i64 {
        i64::from(self.last_col) - i64::from(self.col1) + 1
    }

    /// Extent as a bounding box
    pub fn bounds(&self) -> DomainBounds {
        DomainBounds::new_unchecked(self.first_line, self.last_line, self.col1, self.last_col)
    }
}

/// Pool of chain nodes with a free list
#[derive(Debug)]
pub struct ChainArena {
    nodes: Vec<Node>,
    free: Vec<NodeId>,
    block_size: usize,
    blocks: usize,
}

impl ChainArena {
    /// Create an arena that grows in blocks of `block_size` nodes.
    ///
    /// The first block is reserved immediately.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the first block cannot be reserved.
    pub fn with_block_size(block_size: usize) -> RegionResult<Self> {
        let block_size = block_size.max(16);
        let mut nodes = Vec::new();
        nodes.try_reserve_exact(block_size)?;
        Ok(Self {
            nodes,
            free: Vec::new(),
            block_size,
            blocks: 1,
        })
    }

    /// Number of blocks reserved so far
    pub fn blocks(&self) -> usize {
        self.blocks
    }

    /// Number of nodes currently in use
    pub fn live_nodes(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    fn alloc(&mut self, node: Node) -> RegionResult<NodeId> {
        if let Some(id) = self.free.pop() {
            self.nodes[id.index()] = node;
            return Ok(id);
        }
        if self.nodes.len() == self.nodes.capacity() {
            self.nodes.try_reserve_exact(self.block_size)?;
            self.free.try_reserve(self.block_size)?;
            self.blocks += 1;
            trace!(
                "chain arena grown to {} blocks ({} nodes)",
                self.blocks,
                self.nodes.capacity()
            );
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        Ok(id)
    }

    fn release(&mut self, id: NodeId) {
        self.nodes[id.index()] = Node::Free;
        self.free.push(id);
    }

    fn next(&self, id: NodeId) -> NodeId {
        match self.nodes[id.index()] {
            Node::Interval { next, .. } | Node::Line { next, .. } => next,
            _ => unreachable!("chain walk reached a node outside any chain"),
        }
    }

    fn set_next(&mut self, id: NodeId, to: NodeId) {
        match &mut self.nodes[id.index()] {
            Node::Interval { next, .. } | Node::Line { next, .. } => *next = to,
            _ => unreachable!("relinking a node outside any chain"),
        }
    }

    fn interval(&self, id: NodeId) -> Interval {
        match self.nodes[id.index()] {
            Node::Interval { interval, .. } => interval,
            _ => unreachable!("expected an interval node"),
        }
    }

    fn line_intervals(&self, id: NodeId) -> Option<NodeId> {
        match self.nodes[id.index()] {
            Node::Line { intervals, .. } => intervals,
            _ => unreachable!("expected a line node"),
        }
    }

    fn set_line_intervals(&mut self, id: NodeId, last: Option<NodeId>) {
        match &mut self.nodes[id.index()] {
            Node::Line { intervals, .. } => *intervals = last,
            _ => unreachable!("expected a line node"),
        }
    }

    fn object(&self, id: NodeId) -> (i32, i32, NodeId) {
        match self.nodes[id.index()] {
            Node::Object {
                first_line,
                last_line,
                lines,
            } => (first_line, last_line, lines),
            _ => unreachable!("expected an object record"),
        }
    }

    /// Line range `(first_line, last_line)` of an open record
    pub fn record_lines(&self, record: NodeId) -> (i32, i32) {
        let (first_line, last_line, _) = self.object(record);
        (first_line, last_line)
    }

    // Append `item` after `last` in a circular chain, returning the new last.
    fn push_after(&mut self, last: Option<NodeId>, item: NodeId) -> NodeId {
        match last {
            Some(last) => {
                let first = self.next(last);
                self.set_next(item, first);
                self.set_next(last, item);
            }
            None => self.set_next(item, item),
        }
        item
    }

    fn push_line(
        &mut self,
        last_line: Option<NodeId>,
        intervals: Option<NodeId>,
    ) -> RegionResult<NodeId> {
        let id = self.alloc(Node::Line {
            next: NodeId(0),
            intervals,
        })?;
        Ok(self.push_after(last_line, id))
    }

    fn push_interval(&mut self, last: Option<NodeId>, interval: Interval) -> RegionResult<NodeId> {
        let id = self.alloc(Node::Interval {
            next: NodeId(0),
            interval,
        })?;
        Ok(self.push_after(last, id))
    }

    /// Open a new record holding a single interval on `line`.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the pool cannot grow.
    pub fn open_record(&mut self, line: i32, interval: Interval) -> RegionResult<NodeId> {
        let iv = self.push_interval(None, interval)?;
        let ln = self.push_line(None, Some(iv))?;
        self.alloc(Node::Object {
            first_line: line,
            last_line: line,
            lines: ln,
        })
    }

    /// Attach an interval of `line` to an open record.
    ///
    /// The record must end on `line` or on the line just above it, and
    /// `interval` must lie right of every interval the record already has
    /// on `line`.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the pool cannot grow.
    pub fn attach(&mut self, record: NodeId, line: i32, interval: Interval) -> RegionResult<()> {
        let (first_line, last_line, lines) = self.object(record);
        debug_assert!(line == last_line || line == last_line + 1);

        if line == last_line {
            let last = self.line_intervals(lines);
            let iv = self.push_interval(last, interval)?;
            self.set_line_intervals(lines, Some(iv));
        } else {
            let iv = self.push_interval(None, interval)?;
            let ln = self.push_line(Some(lines), Some(iv))?;
            self.nodes[record.index()] = Node::Object {
                first_line,
                last_line: line,
                lines: ln,
            };
        }
        Ok(())
    }

    /// Merge two interval chains, each in ascending `left` order, into one.
    ///
    /// Ties on `left` keep the node from `a` first. Either chain may be
    /// absent. Returns the last node of the merged chain.
    pub fn monotone_join(&mut self, a: Option<NodeId>, b: Option<NodeId>) -> Option<NodeId> {
        let (a_last, b_last) = match (a, b) {
            (Some(a_last), Some(b_last)) => (a_last, b_last),
            (a, None) => return a,
            (None, b) => return b,
        };

        let mut pa = Some(self.next(a_last));
        let mut pb = Some(self.next(b_last));
        let mut head: Option<NodeId> = None;
        let mut tail: Option<NodeId> = None;

        loop {
            let take_a = match (pa, pb) {
                (Some(x), Some(y)) => self.interval(x).left <= self.interval(y).left,
                (Some(_), None) => true,
                (None, Some(_)) => false,
                (None, None) => break,
            };
            let taken = if take_a {
                let x = pa.unwrap_or(a_last);
                pa = if x == a_last { None } else { Some(self.next(x)) };
                x
            } else {
                let y = pb.unwrap_or(b_last);
                pb = if y == b_last { None } else { Some(self.next(y)) };
                y
            };
            match tail {
                Some(t) => self.set_next(t, taken),
                None => head = Some(taken),
            }
            tail = Some(taken);
        }

        if let (Some(head), Some(tail)) = (head, tail) {
            self.set_next(tail, head);
        }
        tail
    }

    /// Splice `absorbed` into `survivor` line by line and free the absorbed
    /// record.
    ///
    /// `survivor` must not start after `absorbed`. The survivor's line
    /// chain is padded with empty lines when the absorbed record reaches
    /// further down.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if padding lines cannot be allocated.
    pub fn merge(&mut self, survivor: NodeId, absorbed: NodeId) -> RegionResult<()> {
        let (s_first, s_last, mut s_lines) = self.object(survivor);
        let (b_first, b_last, b_lines) = self.object(absorbed);
        debug_assert!(s_first <= b_first);

        let mut padded_last = s_last;
        while padded_last < b_last {
            s_lines = self.push_line(Some(s_lines), None)?;
            padded_last += 1;
        }

        let mut s_cur = self.next(s_lines);
        for _ in s_first..b_first {
            s_cur = self.next(s_cur);
        }

        let mut b_cur = self.next(b_lines);
        for line in b_first..=b_last {
            let b_next = self.next(b_cur);
            let joined = self.monotone_join(self.line_intervals(s_cur), self.line_intervals(b_cur));
            self.set_line_intervals(s_cur, joined);
            self.release(b_cur);
            if line < b_last {
                s_cur = self.next(s_cur);
                b_cur = b_next;
            }
        }

        self.nodes[survivor.index()] = Node::Object {
            first_line: s_first,
            last_line: padded_last,
            lines: s_lines,
        };
        self.release(absorbed);
        Ok(())
    }

    /// Walk a record's chains for its exact extent.
    pub fn extent(&self, record: NodeId) -> RecordExtent {
        let (first_line, last_line, lines) = self.object(record);
        let mut extent = RecordExtent {
            first_line,
            last_line,
            col1: i32::MAX,
            last_col: i32::MIN,
            intervals: 0,
        };

        self.for_each_line(lines, |_, ivs| {
            if let (Some(first), Some(last)) = (ivs.first(), ivs.last()) {
                extent.col1 = extent.col1.min(first.left);
                extent.last_col = extent.last_col.max(last.right);
                extent.intervals += ivs.len();
            }
        });
        extent
    }

    // Visit every line of a line chain in order with its intervals.
    fn for_each_line<F>(&self, last_line: NodeId, mut f: F)
    where
        F: FnMut(usize, &[Interval]),
    {
        let mut buf = Vec::new();
        let mut ln = self.next(last_line);
        let mut index = 0;
        loop {
            buf.clear();
            if let Some(last_iv) = self.line_intervals(ln) {
                let mut iv = self.next(last_iv);
                loop {
                    buf.push(self.interval(iv));
                    if iv == last_iv {
                        break;
                    }
                    iv = self.next(iv);
                }
            }
            f(index, &buf);
            if ln == last_line {
                break;
            }
            ln = self.next(ln);
            index += 1;
        }
    }

    /// Build the domain of a closed record, rebased to its own column
    /// origin.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the domain storage cannot be
    /// reserved.
    pub fn materialize(
        &self,
        record: NodeId,
        extent: &RecordExtent,
    ) -> RegionResult<IntervalDomain> {
        let (_, _, lines) = self.object(record);
        let mut domain = IntvlDomain::new(extent.bounds())?;
        let mut result = Ok(());

        self.for_each_line(lines, |index, ivs| {
            if result.is_err() || ivs.is_empty() {
                return;
            }
            let line = IntervalLine::from_sorted_unchecked(
                ivs.iter().map(|iv| iv.shift(extent.col1.wrapping_neg())).collect(),
            );
            result = domain.set_line(extent.first_line + index as i32, line);
        });
        result?;

        Ok(IntervalDomain::Intvl(domain))
    }

    /// Return every node of a closed record to the free list.
    pub fn recycle(&mut self, record: NodeId) {
        let (_, _, last_line) = self.object(record);
        let mut ln = self.next(last_line);
        loop {
            if let Some(last_iv) = self.line_intervals(ln) {
                let mut iv = self.next(last_iv);
                loop {
                    let next = self.next(iv);
                    self.release(iv);
                    if iv == last_iv {
                        break;
                    }
                    iv = next;
                }
            }
            let next = self.next(ln);
            self.release(ln);
            if ln == last_line {
                break;
            }
            ln = next;
        }
        self.release(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(left: i32, right: i32) -> Interval {
        Interval::new_unchecked(left, right)
    }

    fn chain(arena: &mut ChainArena, ivs: &[(i32, i32)]) -> Option<NodeId> {
        let mut last = None;
        for &(l, r) in ivs {
            last = Some(arena.push_interval(last, iv(l, r)).unwrap());
        }
        last
    }

    fn collect(arena: &ChainArena, last: Option<NodeId>) -> Vec<(i32, i32)> {
        let Some(last) = last else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut id = arena.next(last);
        loop {
            let i = arena.interval(id);
            out.push((i.left, i.right));
            if id == last {
                break;
            }
            id = arena.next(id);
        }
        out
    }

    #[test]
    fn test_open_attach_extent() {
        let mut arena = ChainArena::with_block_size(4).unwrap();
        let rec = arena.open_record(5, iv(10, 12)).unwrap();
        arena.attach(rec, 5, iv(20, 21)).unwrap();
        arena.attach(rec, 6, iv(8, 9)).unwrap();

        let extent = arena.extent(rec);
        assert_eq!(
            extent,
            RecordExtent {
                first_line: 5,
                last_line: 6,
                col1: 8,
                last_col: 21,
                intervals: 3,
            }
        );
        assert_eq!((extent.height(), extent.width()), (2, 14));

        let domain = arena.materialize(rec, &extent).unwrap();
        assert!(domain.contains(5, 10));
        assert!(domain.contains(5, 21));
        assert!(domain.contains(6, 8));
        assert!(!domain.contains(6, 10));
        assert_eq!(domain.area(), 3 + 2 + 2);
        domain.validate().unwrap();

        arena.recycle(rec);
        assert_eq!(arena.live_nodes(), 0);
    }

    #[test]
    fn test_extent_spans_full_coordinate_range() {
        let extent = RecordExtent {
            first_line: i32::MIN,
            last_line: i32::MAX,
            col1: i32::MIN,
            last_col: i32::MAX,
            intervals: 2,
        };
        assert_eq!(extent.height(), 1i64 << 32);
        assert_eq!(extent.width(), 1i64 << 32);
    }

    #[test]
    fn test_materialize_at_minimum_column() {
        let mut arena = ChainArena::with_block_size(4).unwrap();
        let rec = arena.open_record(0, iv(i32::MIN, i32::MIN + 1)).unwrap();
        arena.attach(rec, 1, iv(i32::MIN, i32::MIN)).unwrap();

        let extent = arena.extent(rec);
        assert_eq!((extent.height(), extent.width()), (2, 2));
        let domain = arena.materialize(rec, &extent).unwrap();
        assert_eq!(domain.area(), 3);
        assert!(domain.contains(0, i32::MIN + 1));
        assert!(!domain.contains(1, i32::MIN + 1));
        domain.validate().unwrap();
    }

    #[test]
    fn test_monotone_join_stable_on_ties() {
        let mut arena = ChainArena::with_block_size(16).unwrap();
        let a = chain(&mut arena, &[(0, 1), (10, 11)]);
        let b = chain(&mut arena, &[(5, 6), (10, 12), (20, 20)]);
        let a_first = arena.next(a.unwrap());

        let joined = arena.monotone_join(a, b);
        assert_eq!(
            collect(&arena, joined),
            vec![(0, 1), (5, 6), (10, 11), (10, 12), (20, 20)]
        );
        // Chain stays circular: first node follows the last
        assert_eq!(arena.next(joined.unwrap()), a_first);

        assert_eq!(arena.monotone_join(None, None), None);
        let c = chain(&mut arena, &[(3, 3)]);
        assert_eq!(arena.monotone_join(None, c), c);
    }

    #[test]
    fn test_merge_pads_and_joins() {
        let mut arena = ChainArena::with_block_size(16).unwrap();
        // Survivor spans lines 0..=1, absorbed spans lines 1..=2
        let s = arena.open_record(0, iv(0, 0)).unwrap();
        arena.attach(s, 1, iv(0, 0)).unwrap();
        let b = arena.open_record(1, iv(4, 4)).unwrap();
        arena.attach(b, 2, iv(3, 5)).unwrap();

        arena.merge(s, b).unwrap();
        assert_eq!(arena.record_lines(s), (0, 2));

        let extent = arena.extent(s);
        assert_eq!(extent.intervals, 4);
        let domain = arena.materialize(s, &extent).unwrap();
        assert_eq!(
            domain.absolute_line(1),
            IntervalLine::from_ranges([(0, 0), (4, 4)])
        );
        assert_eq!(domain.absolute_line(2), IntervalLine::single(3, 5));

        arena.recycle(s);
        assert_eq!(arena.live_nodes(), 0);
    }

    #[test]
    fn test_arena_grows_and_reuses_slots() {
        let mut arena = ChainArena::with_block_size(1).unwrap();
        let mut records = Vec::new();
        for line in 0..40 {
            records.push(arena.open_record(line, iv(0, 0)).unwrap());
        }
        assert!(arena.blocks() > 1);
        let capacity = arena.nodes.len();

        for rec in records {
            arena.recycle(rec);
        }
        assert_eq!(arena.live_nodes(), 0);

        for line in 0..40 {
            arena.open_record(line, iv(1, 1)).unwrap();
        }
        assert_eq!(arena.nodes.len(), capacity);
    }
}
