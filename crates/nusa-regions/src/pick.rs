use nusa_geom::{Ray, Vec3};

use crate::registry::{Region, RegionId};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    pub region: RegionId,
    pub distance: f32,
    pub point: Vec3,
}

/// Closest region hit by `ray`. Equal distances resolve to the lower id so
/// picking is stable between frames.
pub fn pick_ray(regions: &[Region], ray: &Ray) -> Option<PickHit> {
    let mut best: Option<PickHit> = None;
    for region in regions {
        let Some(t) = region.solid.ray_hit(ray) else {
            continue;
        };
        let closer = match &best {
            None => true,
            Some(b) => t < b.distance || (t == b.distance && region.id < b.region),
        };
        if closer {
            best = Some(PickHit {
                region: region.id,
                distance: t,
                point: ray.at(t),
            });
        }
    }
    best
}
