//! The resource aliaser packs image lifetimes into shared storage slots.
//!
//! Every written resource of every pass becomes a usage interval on the task
//! timeline: the producer's slot index plus one point per consumer. Intervals
//! that do not overlap are packed into the same aliased slot by a greedy
//! first-fit scan, so a position buffer written early in the frame can share
//! storage with a composition target written at its end. Non-image resources
//! and resources tagged `dont_optimize` always keep a dedicated slot.

use std::collections::BTreeSet;

use log::debug;
use serde::Serialize;

use crate::compiler::types::Task;
use crate::graph::pass::{AccessType, Resource, ResourceType};
use crate::graph::render_graph::RenderGraph;
use crate::util::id::{Id, IdSequence};

fn is_optimizable(ty: ResourceType) -> bool {
    ty == ResourceType::Image
}

/// One consumer of a produced resource, resolved from an edge.
#[derive(Debug, Clone)]
pub(crate) struct ConsumerInfo {
    pub pass: Id,
    pub task_index: i32,
    pub pass_name: String,
    pub resource: Id,
    pub resource_name: String,
    pub access: AccessType,
}

/// A produced resource (a `Write` declaration on some pass) together with the
/// consumers its outgoing edges resolve to.
#[derive(Debug, Clone)]
pub(crate) struct ResourceInfo {
    pub origin_pass: Id,
    pub origin_task_index: i32,
    pub origin_pass_name: String,
    pub resource: Resource,
    pub ty: ResourceType,
    pub optimizable: bool,
    pub consumers: Vec<ConsumerInfo>,
}

/// A single use of a resource on the task timeline.
///
/// Ordering and equality consider the timeline index alone, so two usages at
/// the same index collide when collected into a set.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsagePoint {
    /// Task-order index at which the use happens.
    pub point: i32,
    #[serde(rename = "userResId")]
    pub user_resource: Id,
    /// Resource name on the using pass.
    pub used_as: String,
    #[serde(rename = "userNodeId")]
    pub user_pass: Id,
    /// Name of the using pass.
    pub used_by: String,
    pub access: AccessType,
}

impl PartialEq for UsagePoint {
    fn eq(&self, other: &Self) -> bool {
        self.point == other.point
    }
}

impl Eq for UsagePoint {}

impl PartialOrd for UsagePoint {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UsagePoint {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.point.cmp(&other.point)
    }
}

impl UsagePoint {
    fn producer(info: &ResourceInfo) -> Self {
        UsagePoint {
            point: info.origin_task_index,
            user_resource: info.resource.id,
            used_as: info.resource.name.clone(),
            user_pass: info.origin_pass,
            used_by: info.origin_pass_name.clone(),
            access: info.resource.access,
        }
    }

    fn consumer(info: &ConsumerInfo) -> Self {
        UsagePoint {
            point: info.task_index,
            user_resource: info.resource,
            used_as: info.resource_name.clone(),
            user_pass: info.pass,
            used_by: info.pass_name.clone(),
            access: info.access,
        }
    }
}

/// Inclusive range `[start, end]` of task-timeline indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageRange {
    pub start: i32,
    pub end: i32,
}

impl UsageRange {
    /// Create a range. Panics when `start > end`; that is a programming error
    /// and cannot arise from well-formed input.
    pub fn new(start: i32, end: i32) -> Self {
        assert!(
            start <= end,
            "range starting point {start} is greater than the end point {end}"
        );
        UsageRange {
            start,
            end,
        }
    }

    fn from_points(points: &BTreeSet<UsagePoint>) -> Self {
        // The set is ordered by timeline index and always holds the producer.
        let start = points.first().map(|p| p.point).unwrap_or(0);
        let end = points.last().map(|p| p.point).unwrap_or(0);
        Self::new(start, end)
    }

    /// Two inclusive ranges overlap iff the larger start precedes the smaller
    /// end.
    pub fn overlaps(&self, other: UsageRange) -> bool {
        self.start.max(other.start) <= self.end.min(other.end)
    }
}

/// A synthesized storage slot shared by one or more original resources with
/// disjoint live ranges.
#[derive(Debug, Clone)]
pub struct AliasedResource {
    pub id: Id,
    /// All uses mapped into this slot, ordered by timeline index.
    pub usage_points: BTreeSet<UsagePoint>,
    /// The resource that opened this slot.
    pub original_resource: Resource,
    /// The pass producing [`original_resource`](AliasedResource::original_resource).
    pub original_pass: Id,
    pub ty: ResourceType,
}

impl AliasedResource {
    /// The current live range of this slot.
    pub fn usage_range(&self) -> UsageRange {
        UsageRange::from_points(&self.usage_points)
    }

    /// A slot opened for a non-optimizable resource is reserved for that
    /// resource alone and never accepts aliases.
    pub fn is_dedicated(&self) -> bool {
        !is_optimizable(self.ty) || self.original_resource.flags.dont_optimize
    }

    /// Map another resource's usage points into this slot. Rejects the whole
    /// batch when any point collides with an occupied timeline index.
    pub(crate) fn insert_usage_points(&mut self, points: &BTreeSet<UsagePoint>) -> bool {
        if points.iter().any(|point| self.usage_points.contains(point)) {
            return false;
        }
        self.usage_points.extend(points.iter().cloned());
        true
    }
}

/// Aliaser results and statistics.
#[derive(Debug, Clone)]
pub struct AliaserOutput {
    /// The aliased slots, in creation order.
    pub aliased: Vec<AliasedResource>,
    /// Clones of the original produced resources, in discovery order.
    pub original_resources: Vec<Resource>,
    /// Number of slots forced because their resource was not optimizable.
    pub non_optimizables: i32,
    /// `pre_count - post_count`.
    pub reduction: i32,
    /// Number of produced resources before packing.
    pub pre_count: i32,
    /// Number of slots after packing.
    pub post_count: i32,
    /// `[0, pass count]` on the task timeline.
    pub timeline_range: UsageRange,
}

/// Builds usage intervals for every produced resource and packs them into
/// aliased slots. Deterministic given the graph's pass and edge insertion
/// order.
pub struct ResourceAliaser<'a> {
    graph: &'a RenderGraph,
    tasks: &'a [Task],
}

impl<'a> ResourceAliaser<'a> {
    pub fn new(graph: &'a RenderGraph, tasks: &'a [Task]) -> Self {
        ResourceAliaser {
            graph,
            tasks,
        }
    }

    /// Run the packing algorithm.
    pub fn run(&self) -> AliaserOutput {
        let infos = self.required_resources();

        let mut aliased: Vec<AliasedResource> = Vec::new();
        let mut non_optimizables = 0;
        for info in &infos {
            let id = IdSequence::next();
            let points = Self::usage_points(info);
            let incoming = UsageRange::from_points(&points);

            let open_slot = |points: BTreeSet<UsagePoint>| AliasedResource {
                id,
                usage_points: points,
                original_resource: info.resource.clone(),
                original_pass: info.origin_pass,
                ty: info.ty,
            };

            if !info.optimizable || info.resource.flags.dont_optimize {
                aliased.push(open_slot(points));
                non_optimizables += 1;
                continue;
            }

            if aliased.is_empty() {
                aliased.push(open_slot(points));
                continue;
            }

            let mut inserted = false;
            for slot in &mut aliased {
                if slot.is_dedicated() {
                    continue;
                }
                if !slot.usage_range().overlaps(incoming) && slot.insert_usage_points(&points) {
                    inserted = true;
                    break;
                }
            }
            if !inserted {
                aliased.push(open_slot(points));
            }
        }

        debug!(
            "aliased {} produced resources into {} slots ({} dedicated)",
            infos.len(),
            aliased.len(),
            non_optimizables
        );

        AliaserOutput {
            original_resources: infos.iter().map(|info| info.resource.clone()).collect(),
            non_optimizables,
            reduction: (infos.len() - aliased.len()) as i32,
            pre_count: infos.len() as i32,
            post_count: aliased.len() as i32,
            timeline_range: UsageRange::new(0, self.graph.passes().len() as i32),
            aliased,
        }
    }

    /// Index of the task whose main or async slot runs the given pass. Passes
    /// not present in the task order land one past the end of the timeline.
    fn task_index(&self, pass: Id) -> i32 {
        self.tasks
            .iter()
            .position(|task| task.pass == pass || task.async_pass == Some(pass))
            .unwrap_or(self.tasks.len()) as i32
    }

    fn required_resources(&self) -> Vec<ResourceInfo> {
        let mut infos = Vec::new();

        for pass in self.graph.passes() {
            for resource in pass.resources().iter().filter(|res| res.access == AccessType::Write) {
                infos.push(ResourceInfo {
                    origin_pass: pass.id(),
                    origin_task_index: self.task_index(pass.id()),
                    origin_pass_name: pass.name().to_owned(),
                    resource: resource.clone(),
                    ty: resource.ty,
                    optimizable: is_optimizable(resource.ty),
                    consumers: Vec::new(),
                });
            }
        }

        for info in &mut infos {
            for edge in self.graph.edges() {
                if edge.src != info.origin_pass || edge.src_resource != info.resource.id {
                    continue;
                }

                let Some(consumer_pass) = self.graph.pass(edge.dst) else {
                    continue;
                };
                let Some(consumer_res) = consumer_pass.resource_by_id(edge.dst_resource) else {
                    continue;
                };

                info.consumers.push(ConsumerInfo {
                    pass: consumer_pass.id(),
                    task_index: self.task_index(consumer_pass.id()),
                    pass_name: consumer_pass.name().to_owned(),
                    resource: consumer_res.id,
                    resource_name: consumer_res.name.clone(),
                    access: consumer_res.access,
                });
            }
        }

        infos
    }

    fn usage_points(info: &ResourceInfo) -> BTreeSet<UsagePoint> {
        let mut points = BTreeSet::new();
        // Insert keeps the first point at a given index, so consumers sharing
        // the producer's task slot collapse into the producer point.
        points.insert(UsagePoint::producer(info));
        for consumer in &info.consumers {
            points.insert(UsagePoint::consumer(consumer));
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(index: i32) -> UsagePoint {
        UsagePoint {
            point: index,
            user_resource: 0,
            used_as: String::new(),
            user_pass: 0,
            used_by: String::new(),
            access: AccessType::Read,
        }
    }

    #[test]
    fn ranges_overlap_when_touching() {
        assert!(UsageRange::new(0, 2).overlaps(UsageRange::new(2, 4)));
        assert!(UsageRange::new(1, 5).overlaps(UsageRange::new(2, 3)));
        assert!(!UsageRange::new(0, 1).overlaps(UsageRange::new(2, 4)));
        assert!(!UsageRange::new(3, 4).overlaps(UsageRange::new(0, 2)));
    }

    #[test]
    #[should_panic(expected = "greater than the end point")]
    fn reversed_range_is_rejected() {
        let _ = UsageRange::new(3, 1);
    }

    #[test]
    fn usage_points_collide_on_the_timeline_index() {
        let mut points = BTreeSet::new();
        let mut first = point(2);
        first.used_by = String::from("producer");
        assert!(points.insert(first));
        let mut second = point(2);
        second.used_by = String::from("consumer");
        assert!(!points.insert(second));

        assert_eq!(points.len(), 1);
        assert_eq!(points.first().unwrap().used_by, "producer");
    }

    #[test]
    fn slot_insert_rejects_occupied_indices() {
        let mut slot = AliasedResource {
            id: 0,
            usage_points: [point(1), point(2)].into_iter().collect(),
            original_resource: Resource {
                id: 0,
                name: String::from("image"),
                ty: ResourceType::Image,
                access: AccessType::Write,
                flags: Default::default(),
            },
            original_pass: 0,
            ty: ResourceType::Image,
        };

        let colliding: BTreeSet<_> = [point(2), point(5)].into_iter().collect();
        assert!(!slot.insert_usage_points(&colliding));
        assert_eq!(slot.usage_points.len(), 2);

        let disjoint: BTreeSet<_> = [point(4), point(5)].into_iter().collect();
        assert!(slot.insert_usage_points(&disjoint));
        assert_eq!(slot.usage_range(), UsageRange::new(1, 5));
    }
}
