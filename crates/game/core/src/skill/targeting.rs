//! Target selection shapes used by melee and ranged skills.
use crate::common::Vec2;
use crate::env::TargetInfo;

/// Vertical tolerance of a straight shot.
pub const LINE_HALF_WIDTH: f32 = 0.75;

/// Sorts candidates by distance from `origin`, nearest first.
pub fn nearest_first(origin: Vec2, candidates: &mut [TargetInfo]) {
    candidates.sort_by(|a, b| {
        origin
            .distance(a.position)
            .total_cmp(&origin.distance(b.position))
    });
}

/// Candidates inside a cone of `angle` degrees centred on `direction`.
///
/// A candidate standing exactly on the origin has no direction and is kept.
pub fn within_cone(
    origin: Vec2,
    direction: Vec2,
    angle: f32,
    candidates: Vec<TargetInfo>,
) -> Vec<TargetInfo> {
    let half = angle / 2.0;
    candidates
        .into_iter()
        .filter(|candidate| {
            let offset = candidate.position - origin;
            offset.length() <= f32::EPSILON || direction.angle_to(offset) <= half
        })
        .collect()
}

/// Candidates ahead of `origin` along a horizontal `direction`, within
/// [`LINE_HALF_WIDTH`] of the line.
pub fn along_line(origin: Vec2, direction: Vec2, candidates: Vec<TargetInfo>) -> Vec<TargetInfo> {
    let direction = direction.normalized();
    candidates
        .into_iter()
        .filter(|candidate| {
            let offset = candidate.position - origin;
            let ahead = offset.dot(direction);
            let lateral = (offset - direction * ahead).length();
            ahead >= 0.0 && lateral <= LINE_HALF_WIDTH
        })
        .collect()
}
