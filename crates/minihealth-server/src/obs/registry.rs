//! Metric registry: counters, gauges, and histograms with dynamic labels.
//!
//! Metrics are registered once at startup (by name, with a fixed ordered label
//! set) and mutated concurrently from request handlers afterwards. Cells are
//! backed by `DashMap` + atomics so updates to different cells never contend
//! and updates to the same cell are lock-free. `render()` produces the
//! Prometheus text exposition format; registration order is render order and
//! cells are sorted by label values, so output is deterministic.

use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use minihealth_core::error::{HealthError, Result};

/// Default duration buckets in seconds, matching the Prometheus client defaults.
pub const DEFAULT_DURATION_BUCKETS: [f64; 14] = [
    0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

/// Kind of a registered metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
    Histogram,
}

impl MetricKind {
    fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Histogram => "histogram",
        }
    }
}

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Helper to escape HELP text.
fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

fn label_pairs(names: &[String], values: &[String]) -> String {
    names
        .iter()
        .zip(values.iter())
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Add a delta to an f64 stored as AtomicU64 bits (CAS loop, no lost updates).
fn atomic_f64_add(cell: &AtomicU64, delta: f64) {
    let mut cur = cell.load(Ordering::Relaxed);
    loop {
        let next = (f64::from_bits(cur) + delta).to_bits();
        match cell.compare_exchange_weak(cur, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return,
            Err(actual) => cur = actual,
        }
    }
}

#[derive(Default, Debug)]
struct CounterVec {
    cells: DashMap<Vec<String>, AtomicU64>,
}

#[derive(Default, Debug)]
struct GaugeVec {
    // f64 stored as bit pattern; `store` gives last-write-wins.
    cells: DashMap<Vec<String>, AtomicU64>,
}

#[derive(Debug)]
struct HistogramCell {
    // Cumulative: bucket[i] counts every observation <= bounds[i].
    buckets: Vec<AtomicU64>,
    sum: AtomicU64,
    count: AtomicU64,
}

impl HistogramCell {
    fn new(len: usize) -> Self {
        Self {
            buckets: (0..len).map(|_| AtomicU64::new(0)).collect(),
            sum: AtomicU64::new(0f64.to_bits()),
            count: AtomicU64::new(0),
        }
    }
}

#[derive(Debug)]
struct HistogramVec {
    bounds: Vec<f64>,
    cells: DashMap<Vec<String>, HistogramCell>,
}

#[derive(Debug)]
enum FamilyData {
    Counter(CounterVec),
    Gauge(GaugeVec),
    Histogram(HistogramVec),
}

impl FamilyData {
    fn kind(&self) -> MetricKind {
        match self {
            FamilyData::Counter(_) => MetricKind::Counter,
            FamilyData::Gauge(_) => MetricKind::Gauge,
            FamilyData::Histogram(_) => MetricKind::Histogram,
        }
    }
}

/// One registered metric: name, help, ordered label names, cells.
#[derive(Debug)]
struct Family {
    name: String,
    help: String,
    labels: Vec<String>,
    data: FamilyData,
}

impl Family {
    fn check_arity(&self, values: &[&str]) -> Result<Vec<String>> {
        if values.len() != self.labels.len() {
            return Err(HealthError::UnknownLabelSet {
                metric: self.name.clone(),
                expected: self.labels.len(),
                got: values.len(),
            });
        }
        Ok(values.iter().map(|v| v.to_string()).collect())
    }

    fn render(&self, out: &mut String) {
        let _ = writeln!(out, "# HELP {} {}", self.name, escape_help(&self.help));
        let _ = writeln!(out, "# TYPE {} {}", self.name, self.data.kind().as_str());

        match &self.data {
            FamilyData::Counter(vec) => {
                let mut rows: Vec<(Vec<String>, u64)> = vec
                    .cells
                    .iter()
                    .map(|r| (r.key().clone(), r.value().load(Ordering::Relaxed)))
                    .collect();
                rows.sort_by(|a, b| a.0.cmp(&b.0));
                for (key, val) in rows {
                    let pairs = label_pairs(&self.labels, &key);
                    if pairs.is_empty() {
                        let _ = writeln!(out, "{} {}", self.name, val);
                    } else {
                        let _ = writeln!(out, "{}{{{}}} {}", self.name, pairs, val);
                    }
                }
            }
            FamilyData::Gauge(vec) => {
                let mut rows: Vec<(Vec<String>, f64)> = vec
                    .cells
                    .iter()
                    .map(|r| (r.key().clone(), f64::from_bits(r.value().load(Ordering::Relaxed))))
                    .collect();
                rows.sort_by(|a, b| a.0.cmp(&b.0));
                for (key, val) in rows {
                    let pairs = label_pairs(&self.labels, &key);
                    if pairs.is_empty() {
                        let _ = writeln!(out, "{} {}", self.name, val);
                    } else {
                        let _ = writeln!(out, "{}{{{}}} {}", self.name, pairs, val);
                    }
                }
            }
            FamilyData::Histogram(vec) => {
                let mut keys: Vec<Vec<String>> = vec.cells.iter().map(|r| r.key().clone()).collect();
                keys.sort();
                for key in keys {
                    let Some(cell) = vec.cells.get(&key) else { continue };
                    let pairs = label_pairs(&self.labels, &key);
                    let prefix = if pairs.is_empty() {
                        String::new()
                    } else {
                        format!("{},", pairs)
                    };
                    for (i, bound) in vec.bounds.iter().enumerate() {
                        let n = cell.buckets[i].load(Ordering::Relaxed);
                        let _ = writeln!(
                            out,
                            "{}_bucket{{{}le=\"{}\"}} {}",
                            self.name, prefix, bound, n
                        );
                    }
                    let count = cell.count.load(Ordering::Relaxed);
                    let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", self.name, prefix, count);

                    let sum = f64::from_bits(cell.sum.load(Ordering::Relaxed));
                    if pairs.is_empty() {
                        let _ = writeln!(out, "{}_sum {}", self.name, sum);
                        let _ = writeln!(out, "{}_count {}", self.name, count);
                    } else {
                        let _ = writeln!(out, "{}_sum{{{}}} {}", self.name, pairs, sum);
                        let _ = writeln!(out, "{}_count{{{}}} {}", self.name, pairs, count);
                    }
                }
            }
        }
    }
}

/// Process-wide metric registry.
///
/// Registration takes `&mut self` and happens before the registry is shared;
/// afterwards all mutation goes through interior-mutable cells, so the shared
/// value is `Sync` without a global lock.
#[derive(Default)]
pub struct MetricRegistry {
    families: Vec<Family>,
}

impl MetricRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new metric definition. Fails if `name` is already taken.
    /// Histograms get the default duration buckets.
    pub fn register(
        &mut self,
        name: &str,
        help: &str,
        labels: &[&str],
        kind: MetricKind,
    ) -> Result<()> {
        if self.families.iter().any(|f| f.name == name) {
            return Err(HealthError::DuplicateMetric(name.into()));
        }
        let data = match kind {
            MetricKind::Counter => FamilyData::Counter(CounterVec::default()),
            MetricKind::Gauge => FamilyData::Gauge(GaugeVec::default()),
            MetricKind::Histogram => FamilyData::Histogram(HistogramVec {
                bounds: DEFAULT_DURATION_BUCKETS.to_vec(),
                cells: DashMap::new(),
            }),
        };
        self.families.push(Family {
            name: name.into(),
            help: help.into(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            data,
        });
        Ok(())
    }

    fn family(&self, name: &str) -> Result<&Family> {
        self.families
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| HealthError::UnknownMetric(name.into()))
    }

    /// Typed view over a registered counter.
    pub fn counter(&self, name: &str) -> Result<Counter<'_>> {
        let family = self.family(name)?;
        match &family.data {
            FamilyData::Counter(vec) => Ok(Counter { family, vec }),
            _ => Err(HealthError::KindMismatch(name.into())),
        }
    }

    /// Typed view over a registered gauge.
    pub fn gauge(&self, name: &str) -> Result<Gauge<'_>> {
        let family = self.family(name)?;
        match &family.data {
            FamilyData::Gauge(vec) => Ok(Gauge { family, vec }),
            _ => Err(HealthError::KindMismatch(name.into())),
        }
    }

    /// Typed view over a registered histogram.
    pub fn histogram(&self, name: &str) -> Result<Histogram<'_>> {
        let family = self.family(name)?;
        match &family.data {
            FamilyData::Histogram(vec) => Ok(Histogram { family, vec }),
            _ => Err(HealthError::KindMismatch(name.into())),
        }
    }

    /// Render all metrics in the Prometheus text exposition format.
    ///
    /// Each cell is read independently; there is no cross-cell snapshot.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for family in &self.families {
            family.render(&mut out);
        }
        out
    }
}

#[derive(Debug)]
pub struct Counter<'a> {
    family: &'a Family,
    vec: &'a CounterVec,
}

impl<'a> Counter<'a> {
    /// Resolve the cell for a label-value tuple, creating it on first use.
    pub fn labels(&self, values: &[&str]) -> Result<CounterCell<'a>> {
        let key = self.family.check_arity(values)?;
        Ok(CounterCell { vec: self.vec, key })
    }
}

#[derive(Debug)]
pub struct CounterCell<'a> {
    vec: &'a CounterVec,
    key: Vec<String>,
}

impl CounterCell<'_> {
    pub fn inc(self) {
        self.inc_by(1);
    }

    pub fn inc_by(self, delta: u64) {
        self.vec
            .cells
            .entry(self.key)
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(delta, Ordering::Relaxed);
    }
}

pub struct Gauge<'a> {
    family: &'a Family,
    vec: &'a GaugeVec,
}

impl<'a> Gauge<'a> {
    pub fn labels(&self, values: &[&str]) -> Result<GaugeCell<'a>> {
        let key = self.family.check_arity(values)?;
        Ok(GaugeCell { vec: self.vec, key })
    }
}

pub struct GaugeCell<'a> {
    vec: &'a GaugeVec,
    key: Vec<String>,
}

impl GaugeCell<'_> {
    /// Overwrite the cell value (last-write-wins).
    pub fn set(self, value: f64) {
        self.vec
            .cells
            .entry(self.key)
            .or_insert_with(|| AtomicU64::new(0f64.to_bits()))
            .store(value.to_bits(), Ordering::Relaxed);
    }
}

pub struct Histogram<'a> {
    family: &'a Family,
    vec: &'a HistogramVec,
}

impl<'a> Histogram<'a> {
    pub fn labels(&self, values: &[&str]) -> Result<HistogramCellRef<'a>> {
        let key = self.family.check_arity(values)?;
        Ok(HistogramCellRef { vec: self.vec, key })
    }
}

pub struct HistogramCellRef<'a> {
    vec: &'a HistogramVec,
    key: Vec<String>,
}

impl HistogramCellRef<'_> {
    /// Record one observation: every bucket with bound >= value, the running
    /// sum, and the observation count.
    pub fn observe(self, value: f64) {
        let len = self.vec.bounds.len();
        let cell = self
            .vec
            .cells
            .entry(self.key)
            .or_insert_with(|| HistogramCell::new(len));
        for (i, bound) in self.vec.bounds.iter().enumerate() {
            if value <= *bound {
                cell.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
        atomic_f64_add(&cell.sum, value);
        cell.count.fetch_add(1, Ordering::Relaxed);
    }
}
