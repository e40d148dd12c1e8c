use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

/// Tandem-MS mass filter descriptor (precursor/product windows)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IonTransition {
    /// Compound the transition belongs to
    pub compound_name: String,
    /// First quadrupole window start (parent m/z)
    pub filter1_first_ion: f64,
    /// First quadrupole window stop (parent m/z)
    pub filter1_last_ion: f64,
    /// Third quadrupole window start (daughter m/z)
    pub filter3_first_ion: f64,
    /// Third quadrupole window stop (daughter m/z)
    pub filter3_last_ion: f64,
    /// Collision energy
    pub collision_energy: f64,
    /// First quadrupole resolution
    pub filter1_resolution: f64,
    /// Third quadrupole resolution
    pub filter3_resolution: f64,
    /// Transition group id
    pub transition_group: i32,
}

/// Interning key: the name plus every numeric field by bit pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct IonTransitionKey {
    compound_name: String,
    bounds: [u64; 7],
    transition_group: i32,
}

impl From<&IonTransition> for IonTransitionKey {
    fn from(t: &IonTransition) -> Self {
        Self {
            compound_name: t.compound_name.clone(),
            bounds: [
                t.filter1_first_ion.to_bits(),
                t.filter1_last_ion.to_bits(),
                t.filter3_first_ion.to_bits(),
                t.filter3_last_ion.to_bits(),
                t.collision_energy.to_bits(),
                t.filter1_resolution.to_bits(),
                t.filter3_resolution.to_bits(),
            ],
            transition_group: t.transition_group,
        }
    }
}

/// Registry that hands out one shared instance per distinct transition
///
/// Lookups are thread-safe so the same registry can back concurrent
/// scan-proxy resolution.
#[derive(Debug, Default)]
pub struct IonTransitionSettings {
    transitions: Mutex<HashMap<IonTransitionKey, Arc<IonTransition>>>,
}

impl IonTransitionSettings {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the registered instance equal to `transition`, registering it first if needed
    pub fn get_or_insert(&self, transition: IonTransition) -> Arc<IonTransition> {
        let key = IonTransitionKey::from(&transition);
        let mut transitions = self
            .transitions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        transitions
            .entry(key)
            .or_insert_with(|| Arc::new(transition))
            .clone()
    }

    /// Number of distinct transitions registered
    pub fn len(&self) -> usize {
        self.transitions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True if no transition has been registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A transition attached to one ion, with the dwell time it was acquired with
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionAssignment {
    /// Shared transition descriptor
    pub transition: Arc<IonTransition>,
    /// Dwell time in milliseconds
    pub dwell: i32,
}

/// One (m/z, abundance) pair, optionally acquired through a transition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ion {
    /// Mass-to-charge ratio
    pub mz: f64,
    /// Signal abundance
    pub abundance: f32,
    /// Transition for tandem-MS acquisitions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<TransitionAssignment>,
}

impl Ion {
    /// Plain ion without a transition
    pub fn new(mz: f64, abundance: f32) -> Self {
        Self {
            mz,
            abundance,
            transition: None,
        }
    }

    /// Ion acquired through `transition`
    pub fn with_transition(mz: f64, abundance: f32, transition: Arc<IonTransition>, dwell: i32) -> Self {
        Self {
            mz,
            abundance,
            transition: Some(TransitionAssignment { transition, dwell }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition(name: &str, collision_energy: f64) -> IonTransition {
        IonTransition {
            compound_name: name.to_string(),
            filter1_first_ion: 139.0,
            filter1_last_ion: 139.5,
            filter3_first_ion: 111.0,
            filter3_last_ion: 111.5,
            collision_energy,
            filter1_resolution: 1.2,
            filter3_resolution: 1.2,
            transition_group: 1,
        }
    }

    #[test]
    fn test_equal_transitions_are_interned() {
        let settings = IonTransitionSettings::new();
        let a = settings.get_or_insert(transition("Chlorpyrifos", 15.0));
        let b = settings.get_or_insert(transition("Chlorpyrifos", 15.0));
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(settings.len(), 1);
    }

    #[test]
    fn test_any_field_difference_registers_new_transition() {
        let settings = IonTransitionSettings::new();
        let a = settings.get_or_insert(transition("Chlorpyrifos", 15.0));
        let b = settings.get_or_insert(transition("Chlorpyrifos", 20.0));
        let c = settings.get_or_insert(transition("Atrazine", 15.0));
        assert!(!Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(settings.len(), 3);
    }
}
