use std::borrow::Cow;

use serde::Serialize;

use super::Scan;
use crate::proxy::ScanProxy;
use crate::reader::DecodeError;

/// The scans of a chromatogram, either fully decoded or as lazy proxies
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScanStore {
    /// Full scan records in memory
    Eager(Vec<Scan>),
    /// Summaries that decode their full record on demand
    Proxied(Vec<ScanProxy>),
}

impl Default for ScanStore {
    fn default() -> Self {
        ScanStore::Eager(Vec::new())
    }
}

impl From<Vec<Scan>> for ScanStore {
    fn from(scans: Vec<Scan>) -> Self {
        ScanStore::Eager(scans)
    }
}

impl From<Vec<ScanProxy>> for ScanStore {
    fn from(proxies: Vec<ScanProxy>) -> Self {
        ScanStore::Proxied(proxies)
    }
}

impl ScanStore {
    /// Number of scans
    pub fn len(&self) -> usize {
        match self {
            ScanStore::Eager(scans) => scans.len(),
            ScanStore::Proxied(proxies) => proxies.len(),
        }
    }

    /// True if there are no scans
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if scans are held as proxies
    pub fn is_proxied(&self) -> bool {
        matches!(self, ScanStore::Proxied(_))
    }

    /// Retention time of every scan, available without resolving proxies
    pub fn retention_times(&self) -> Vec<i32> {
        match self {
            ScanStore::Eager(scans) => scans.iter().map(|s| s.retention_time).collect(),
            ScanStore::Proxied(proxies) => proxies.iter().map(|p| p.retention_time).collect(),
        }
    }

    /// (retention time, total signal) of every scan, available without resolving proxies
    pub fn total_signals(&self) -> Vec<(i32, f32)> {
        match self {
            ScanStore::Eager(scans) => scans
                .iter()
                .map(|s| (s.retention_time, s.total_signal()))
                .collect(),
            ScanStore::Proxied(proxies) => proxies
                .iter()
                .map(|p| (p.retention_time, p.total_signal))
                .collect(),
        }
    }

    /// Scan at `index`, resolving it if it is a proxy
    pub fn get(&self, index: usize) -> Result<Option<Cow<'_, Scan>>, DecodeError> {
        match self {
            ScanStore::Eager(scans) => Ok(scans.get(index).map(Cow::Borrowed)),
            ScanStore::Proxied(proxies) => match proxies.get(index) {
                Some(proxy) => Ok(Some(Cow::Owned(proxy.resolve()?))),
                None => Ok(None),
            },
        }
    }

    /// Every scan as a full record, resolving proxies
    pub fn materialize(&self) -> Result<Vec<Scan>, DecodeError> {
        match self {
            ScanStore::Eager(scans) => Ok(scans.clone()),
            ScanStore::Proxied(proxies) => resolve_all(proxies),
        }
    }

    /// Convert into an eager store, resolving proxies
    pub fn into_eager(self) -> Result<ScanStore, DecodeError> {
        match self {
            ScanStore::Eager(_) => Ok(self),
            ScanStore::Proxied(proxies) => Ok(ScanStore::Eager(resolve_all(&proxies)?)),
        }
    }
}

#[cfg(feature = "parallel")]
fn resolve_all(proxies: &[ScanProxy]) -> Result<Vec<Scan>, DecodeError> {
    use rayon::prelude::*;
    proxies.par_iter().map(ScanProxy::resolve).collect()
}

#[cfg(not(feature = "parallel"))]
fn resolve_all(proxies: &[ScanProxy]) -> Result<Vec<Scan>, DecodeError> {
    proxies.iter().map(ScanProxy::resolve).collect()
}
