//! Connected-component labeling of interval domains
//!
//! A single top-to-bottom scan partitions a domain into its maximal
//! connected sub-domains. Every interval of the current line is compared
//! with the intervals of the previous line:
//!
//! - no neighbor: a new provisional record is opened
//! - one neighbor record: the interval is attached to it
//! - several neighbor records: they are merged, the record starting later
//!   being spliced into the earlier one
//!
//! A record that no interval of the current line reaches is closed: its
//! extent is checked against the minimum extent and, if accepted, it is
//! materialized as a new domain. Records live in a [`ChainArena`] owned
//! by the call.

use std::collections::HashSet;

use log::{debug, trace};
use regionkit_core::{
    ConnectivityType, DomainBounds, DomainObject, IntervalDomain, RegionObject, VolumeObject,
};

use crate::arena::{ChainArena, NodeId};
use crate::error::{RegionError, RegionResult};
use crate::label3d::label_planes;

/// Options for connected-component labeling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelOptions {
    /// Connectivity (4 or 8 for 2D domains, 6, 18 or 26 for plane domains)
    pub connectivity: ConnectivityType,
    /// Components whose height or width is at most this many pixels are
    /// discarded
    pub min_extent: i32,
    /// Maximum number of accepted components, `None` for no limit
    pub max_objects: Option<usize>,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            connectivity: ConnectivityType::FourWay,
            min_extent: 0,
            max_objects: None,
        }
    }
}

impl LabelOptions {
    /// Create new options with the specified connectivity
    pub fn new(connectivity: ConnectivityType) -> Self {
        Self {
            connectivity,
            ..Self::default()
        }
    }

    /// Set the minimum extent
    pub fn with_min_extent(mut self, min_extent: i32) -> Self {
        self.min_extent = min_extent;
        self
    }

    /// Set the maximum number of accepted components
    pub fn with_max_objects(mut self, max_objects: usize) -> Self {
        self.max_objects = Some(max_objects);
        self
    }

    pub(crate) fn validate(&self) -> RegionResult<()> {
        if self.min_extent < 0 {
            return Err(RegionError::InvalidParameters(format!(
                "min_extent must be non-negative, got {}",
                self.min_extent
            )));
        }
        Ok(())
    }

    /// Check whether a component of the given size passes the extent filter
    pub fn accepts(&self, height: i64, width: i64) -> bool {
        let min_extent = i64::from(self.min_extent);
        height > min_extent && width > min_extent
    }

    pub(crate) fn check_capacity(&self, accepted: usize) -> RegionResult<()> {
        match self.max_objects {
            Some(capacity) if accepted >= capacity => {
                Err(RegionError::CapacityExceeded { capacity })
            }
            _ => Ok(()),
        }
    }
}

/// Allocation slot: one interval of the previous or current line
#[derive(Debug, Clone, Copy)]
struct Slot {
    left: i32,
    right: i32,
    record: NodeId,
}

/// Partition a 2D domain into its connected components.
///
/// # Arguments
///
/// * `domain` - Domain to label; lines must be coalesced
/// * `options` - Connectivity (4 or 8), minimum extent and optional cap
///
/// # Returns
///
/// One standard domain per accepted component, in the order components
/// are closed by the scan. A `Rect` domain yields itself.
///
/// # Errors
///
/// Returns a core `BadConnectivity` error for 6, 18 or 26,
/// [`RegionError::InvalidParameters`] for a negative minimum extent,
/// [`RegionError::CapacityExceeded`] if more than `max_objects`
/// components are accepted, and an allocation error if the arena cannot
/// grow. No partial output is returned.
pub fn label_domain(
    domain: &IntervalDomain,
    options: &LabelOptions,
) -> RegionResult<Vec<IntervalDomain>> {
    let connectivity = options.connectivity.require_planar()?;
    options.validate()?;

    match domain {
        IntervalDomain::Empty => Ok(Vec::new()),
        IntervalDomain::Rect(b) => {
            if options.accepts(b.height(), b.width()) {
                options.check_capacity(0)?;
                Ok(vec![IntervalDomain::Rect(*b)])
            } else {
                Ok(Vec::new())
            }
        }
        IntervalDomain::Intvl(_) => label_intervals(domain, connectivity, options),
    }
}

fn label_intervals(
    domain: &IntervalDomain,
    connectivity: ConnectivityType,
    options: &LabelOptions,
) -> RegionResult<Vec<IntervalDomain>> {
    let Some(bounds) = domain.bounds() else {
        return Ok(Vec::new());
    };
    // 8-connected intervals touch across a one-column diagonal gap
    let reach = match connectivity {
        ConnectivityType::EightWay => 1,
        _ => 0,
    };

    let mut arena = ChainArena::with_block_size(domain.interval_count() + domain.line_count())?;
    let mut prev: Vec<Slot> = Vec::new();
    let mut cur: Vec<Slot> = Vec::new();
    let width = domain.max_intervals_per_line();
    prev.try_reserve(width)?;
    cur.try_reserve(width)?;

    let mut state = ScanState {
        arena: &mut arena,
        options,
        accepted: Vec::new(),
        rejected: 0,
    };

    debug!(
        "labeling {} lines, {} intervals, {}-connectivity, min extent {}",
        domain.line_count(),
        domain.interval_count(),
        connectivity.value(),
        options.min_extent
    );

    for line in bounds.line1..=bounds.last_line {
        let intervals = domain.absolute_line(line);
        let mut first_match = 0;

        for iv in intervals.iter() {
            // Previous slots ending left of this interval cannot reach any
            // later interval either
            while first_match < prev.len()
                && prev[first_match].right.saturating_add(reach) < iv.left
            {
                first_match += 1;
            }

            let mut record: Option<NodeId> = None;
            let mut k = first_match;
            while k < prev.len() && prev[k].left <= iv.right.saturating_add(reach) {
                let candidate = prev[k].record;
                record = Some(match record {
                    None => {
                        state.arena.attach(candidate, line, *iv)?;
                        candidate
                    }
                    Some(current) if current == candidate => current,
                    Some(current) => state.merge(current, candidate, &mut prev, &mut cur)?,
                });
                k += 1;
            }

            let record = match record {
                Some(r) => r,
                None => state.arena.open_record(line, *iv)?,
            };
            cur.push(Slot {
                left: iv.left,
                right: iv.right,
                record,
            });
        }

        state.close_unreached(&prev, &cur)?;
        std::mem::swap(&mut prev, &mut cur);
        cur.clear();
    }
    state.close_unreached(&prev, &[])?;

    let ScanState {
        accepted, rejected, ..
    } = state;
    debug!(
        "labeling done: {} components accepted, {} rejected, {} arena blocks",
        accepted.len(),
        rejected,
        arena.blocks()
    );
    Ok(accepted)
}

struct ScanState<'a> {
    arena: &'a mut ChainArena,
    options: &'a LabelOptions,
    accepted: Vec<IntervalDomain>,
    rejected: usize,
}

impl ScanState<'_> {
    // Merge two open records; returns the surviving record.
    fn merge(
        &mut self,
        a: NodeId,
        b: NodeId,
        prev: &mut [Slot],
        cur: &mut [Slot],
    ) -> RegionResult<NodeId> {
        let (a_first, _) = self.arena.record_lines(a);
        let (b_first, _) = self.arena.record_lines(b);
        let (survivor, absorbed) = if b_first < a_first { (b, a) } else { (a, b) };

        self.arena.merge(survivor, absorbed)?;
        for slot in prev.iter_mut().chain(cur.iter_mut()) {
            if slot.record == absorbed {
                slot.record = survivor;
            }
        }
        Ok(survivor)
    }

    // Close every record of `prev` that no slot of `cur` refers to.
    fn close_unreached(&mut self, prev: &[Slot], cur: &[Slot]) -> RegionResult<()> {
        let live: HashSet<NodeId> = cur.iter().map(|s| s.record).collect();
        let mut closed: HashSet<NodeId> = HashSet::new();

        for slot in prev {
            if live.contains(&slot.record) || !closed.insert(slot.record) {
                continue;
            }
            self.close(slot.record)?;
        }
        Ok(())
    }

    fn close(&mut self, record: NodeId) -> RegionResult<()> {
        let extent = self.arena.extent(record);
        if self.options.accepts(extent.height(), extent.width()) {
            self.options.check_capacity(self.accepted.len())?;
            let domain = self.arena.materialize(record, &extent)?;
            self.accepted.push(domain);
        } else {
            trace!(
                "rejected component at lines {}..={}: {}x{} pixels",
                extent.first_line,
                extent.last_line,
                extent.height(),
                extent.width()
            );
            self.rejected += 1;
        }
        self.arena.recycle(record);
        Ok(())
    }
}

/// Label the domain of a 2D object.
///
/// Every output object shares the input's values.
///
/// # Errors
///
/// Same as [`label_domain`].
pub fn label_object<V>(
    object: &DomainObject<V>,
    options: &LabelOptions,
) -> RegionResult<Vec<DomainObject<V>>> {
    Ok(label_domain(object.domain(), options)?
        .into_iter()
        .map(|domain| DomainObject::sharing_values_of(domain, object))
        .collect())
}

/// Label any region object.
///
/// - `Empty` yields no components
/// - `Domain2D` is labeled with 4- or 8-connectivity
/// - `Domain3D` is labeled with 6-, 18- or 26-connectivity
/// - `Transformed` is not supported
///
/// Output objects share the input's values.
///
/// # Errors
///
/// Returns a core `NotSupported` error for transformed objects, and the
/// errors of [`label_domain`] or [`label_planes`] otherwise.
pub fn label<V>(
    object: &RegionObject<V>,
    options: &LabelOptions,
) -> RegionResult<Vec<RegionObject<V>>> {
    match object {
        RegionObject::Empty => Ok(Vec::new()),
        RegionObject::Domain2D(o) => Ok(label_object(o, options)?
            .into_iter()
            .map(RegionObject::Domain2D)
            .collect()),
        RegionObject::Domain3D(o) => Ok(label_planes(o.planes(), options)?
            .into_iter()
            .map(|planes| RegionObject::Domain3D(VolumeObject::sharing_values_of(planes, o)))
            .collect()),
        RegionObject::Transformed(_) => Err(regionkit_core::Error::NotSupported(
            "labeling a transformed object",
        )
        .into()),
    }
}

/// Bounding boxes of the components of a domain, in output order.
///
/// # Errors
///
/// Same as [`label_domain`].
pub fn component_bounds(
    domain: &IntervalDomain,
    options: &LabelOptions,
) -> RegionResult<Vec<DomainBounds>> {
    Ok(label_domain(domain, options)?
        .iter()
        .filter_map(IntervalDomain::bounds)
        .collect())
}

/// Number of components of a domain.
///
/// # Errors
///
/// Same as [`label_domain`].
pub fn count_components(domain: &IntervalDomain, options: &LabelOptions) -> RegionResult<usize> {
    Ok(label_domain(domain, options)?.len())
}
