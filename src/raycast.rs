use glam::{Vec2, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }
}

/// A unit quad in the XY plane, centred at `center` and scaled by `scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneBounds {
    pub center: Vec3,
    pub scale: Vec2,
}

/// Hit point in the plane's local space, within `[-0.5, 0.5]²`.
pub fn intersect(ray: &Ray, bounds: &PlaneBounds) -> Option<Vec2> {
    if bounds.scale.x == 0.0 || bounds.scale.y == 0.0 {
        return None;
    }
    if ray.direction.z.abs() < f32::EPSILON {
        return None;
    }
    let t = (bounds.center.z - ray.origin.z) / ray.direction.z;
    if t < 0.0 {
        return None;
    }
    let hit = ray.origin + ray.direction * t;
    let local = (hit - bounds.center).truncate() / bounds.scale;
    (local.x.abs() <= 0.5 && local.y.abs() <= 0.5).then_some(local)
}

/// The plane the pointer is over and where.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub plane: usize,
    pub point: Vec2,
}

/// Nearest hit among `planes`, by distance along the ray.
pub fn intersect_nearest<'a, I>(ray: &Ray, planes: I) -> Option<Intersection>
where
    I: IntoIterator<Item = &'a PlaneBounds>,
{
    planes
        .into_iter()
        .enumerate()
        .filter_map(|(index, bounds)| {
            intersect(ray, bounds).map(|point| {
                let distance = (bounds.center.z - ray.origin.z) / ray.direction.z;
                (distance, Intersection { plane: index, point })
            })
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, hit)| hit)
}
