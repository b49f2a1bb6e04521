//! The design container.

use crate::instance::Instance;
use crate::net::Net;
use crate::pin::{Pin, PinRef};
use plc_common::{InstId, Location, NetId, Placement};
use std::collections::BTreeMap;

/// All instances and nets of the loaded design, keyed by ID.
///
/// Ordered maps keep every report and check deterministic.
#[derive(Debug, Clone, Default)]
pub struct Design {
    instances: BTreeMap<InstId, Instance>,
    nets: BTreeMap<NetId, Net>,
}

impl Design {
    /// Creates an empty design.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an instance; returns `false` and keeps the existing one on a duplicate ID.
    pub fn insert_instance(&mut self, inst: Instance) -> bool {
        if self.instances.contains_key(&inst.id) {
            return false;
        }
        self.instances.insert(inst.id, inst);
        true
    }

    /// Adds a net; returns `false` and keeps the existing one on a duplicate ID.
    pub fn insert_net(&mut self, net: Net) -> bool {
        if self.nets.contains_key(&net.id) {
            return false;
        }
        self.nets.insert(net.id, net);
        true
    }

    /// Looks an instance up.
    pub fn instance(&self, id: InstId) -> Option<&Instance> {
        self.instances.get(&id)
    }

    /// Mutable instance lookup.
    pub fn instance_mut(&mut self, id: InstId) -> Option<&mut Instance> {
        self.instances.get_mut(&id)
    }

    /// Instances in ID order.
    pub fn instances(&self) -> impl Iterator<Item = &Instance> {
        self.instances.values()
    }

    /// Mutable iteration over instances in ID order.
    pub fn instances_mut(&mut self) -> impl Iterator<Item = &mut Instance> {
        self.instances.values_mut()
    }

    /// Looks a net up.
    pub fn net(&self, id: NetId) -> Option<&Net> {
        self.nets.get(&id)
    }

    /// Nets in ID order.
    pub fn nets(&self) -> impl Iterator<Item = &Net> {
        self.nets.values()
    }

    /// Number of instances.
    pub fn num_instances(&self) -> usize {
        self.instances.len()
    }

    /// Number of nets.
    pub fn num_nets(&self) -> usize {
        self.nets.len()
    }

    /// Resolves a pin reference.
    pub fn pin(&self, pin: PinRef) -> Option<&Pin> {
        self.instance(pin.inst)?.pins(pin.dir).get(pin.index)
    }

    /// Resolves a pin reference mutably.
    pub fn pin_mut(&mut self, pin: PinRef) -> Option<&mut Pin> {
        self.instance_mut(pin.inst)?
            .pins_mut(pin.dir)
            .get_mut(pin.index)
    }

    /// Location of the pin's owner under `placement`.
    pub fn pin_location(&self, pin: PinRef, placement: Placement) -> Option<Location> {
        self.instance(pin.inst)
            .map(|inst| inst.location_for(placement))
    }

    /// Returns `true` if the net has a placed driver and every fanout is placed
    /// in the driver's tile under `placement`.
    pub fn is_intra_tile(&self, net: &Net, placement: Placement) -> bool {
        let Some(origin) = net
            .driver
            .and_then(|driver| self.pin_location(driver, placement))
            .filter(Location::is_placed)
        else {
            return false;
        };
        net.fanouts.iter().all(|&fanout| {
            self.pin_location(fanout, placement)
                .is_some_and(|loc| loc.is_placed() && loc.tile() == origin.tile())
        })
    }

    /// Number of pins marked timing-critical.
    pub fn num_critical_pins(&self) -> usize {
        self.instances()
            .flat_map(|inst| inst.all_pins())
            .filter(|pin| pin.timing_critical)
            .count()
    }
}
