use glam::{Vec2, Vec3};

use hover_fx::camera::Camera;
use hover_fx::layout::{device_pixel_ratio, ElementRect, PlaneTransform};
use hover_fx::pointer::{client_to_ndc, Pointer};
use hover_fx::raycast::{intersect, intersect_nearest, PlaneBounds, Ray};

fn approx2(a: Vec2, b: Vec2, eps: f32) -> bool {
    (a - b).abs().max_element() < eps
}

fn hit_on_z0(camera: &Camera, ndc: Vec2) -> Vec2 {
    let ray = camera.ray_from_ndc(ndc);
    let t = -ray.origin.z / ray.direction.z;
    (ray.origin + ray.direction * t).truncate()
}

#[test]
fn one_world_unit_is_one_device_pixel() {
    let mut camera = Camera::default();
    camera.resize(800.0, 600.0);
    assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);

    let centre = hit_on_z0(&camera, Vec2::ZERO);
    assert!(approx2(centre, Vec2::ZERO, 0.05), "centre = {centre:?}");

    let corner = hit_on_z0(&camera, Vec2::new(1.0, 1.0));
    assert!(approx2(corner, Vec2::new(400.0, 300.0), 0.5), "corner = {corner:?}");
}

#[test]
fn camera_distance_tracks_canvas_height() {
    let mut camera = Camera::default();
    camera.resize(1920.0, 1080.0);
    let expected = (1080.0 / (37.5f32).to_radians().tan()) * 0.5;
    assert!((camera.position.z - expected).abs() < 1e-2);

    // A degenerate size leaves the camera where it was.
    camera.resize(0.0, 0.0);
    assert!((camera.position.z - expected).abs() < 1e-2);
}

#[test]
fn client_coordinates_map_to_ndc() {
    assert_eq!(client_to_ndc(0.0, 0.0, 800.0, 600.0), Some(Vec2::new(-1.0, 1.0)));
    assert_eq!(client_to_ndc(800.0, 600.0, 800.0, 600.0), Some(Vec2::new(1.0, -1.0)));
    assert_eq!(client_to_ndc(400.0, 300.0, 800.0, 600.0), Some(Vec2::ZERO));
    assert_eq!(client_to_ndc(1.0, 1.0, 0.0, 600.0), None);
}

#[test]
fn pointer_eases_toward_target() {
    let mut pointer = Pointer::new(0.1);
    pointer.set_client(800.0, 600.0, 800.0, 600.0);
    let first = pointer.step();
    assert!(approx2(first, Vec2::new(0.1, -0.1), 1e-6));

    for _ in 0..200 {
        pointer.step();
    }
    assert!(approx2(pointer.current, Vec2::new(1.0, -1.0), 1e-4));

    pointer.set_client(10.0, 10.0, 0.0, 0.0);
    assert_eq!(pointer.target, Vec2::new(1.0, -1.0));
}

fn bounds() -> PlaneBounds {
    PlaneBounds {
        center: Vec3::new(100.0, 50.0, 0.0),
        scale: Vec2::new(200.0, 100.0),
    }
}

#[test]
fn hit_reports_local_point() {
    let ray = Ray::new(Vec3::new(150.0, 75.0, 500.0), Vec3::NEG_Z);
    let local = intersect(&ray, &bounds()).unwrap();
    assert!(approx2(local, Vec2::new(0.25, 0.25), 1e-6));
}

#[test]
fn misses_are_none() {
    let outside = Ray::new(Vec3::new(400.0, 50.0, 500.0), Vec3::NEG_Z);
    assert_eq!(intersect(&outside, &bounds()), None);

    let parallel = Ray::new(Vec3::new(100.0, 50.0, 500.0), Vec3::X);
    assert_eq!(intersect(&parallel, &bounds()), None);

    let behind = Ray::new(Vec3::new(100.0, 50.0, -10.0), Vec3::NEG_Z);
    assert_eq!(intersect(&behind, &bounds()), None);

    let flat = PlaneBounds {
        scale: Vec2::new(0.0, 100.0),
        ..bounds()
    };
    let ray = Ray::new(Vec3::new(100.0, 50.0, 500.0), Vec3::NEG_Z);
    assert_eq!(intersect(&ray, &flat), None);
}

#[test]
fn nearest_plane_wins() {
    let back = bounds();
    let front = PlaneBounds {
        center: Vec3::new(100.0, 50.0, 10.0),
        ..bounds()
    };
    let ray = Ray::new(Vec3::new(100.0, 50.0, 500.0), Vec3::NEG_Z);
    let hit = intersect_nearest(&ray, &[back, front]).unwrap();
    assert_eq!(hit.plane, 1);
    assert!(approx2(hit.point, Vec2::ZERO, 1e-6));
}

#[test]
fn element_rect_maps_to_centred_world_space() {
    let rect = ElementRect {
        left: 100.0,
        top: 50.0,
        width: 200.0,
        height: 100.0,
    };
    let transform = PlaneTransform::from_rect(rect, 2.0, Vec2::new(1600.0, 1200.0));
    assert_eq!(transform.scale, Vec2::new(400.0, 200.0));
    assert_eq!(transform.position, Vec3::new(-400.0, 400.0, 0.0));
    assert_eq!(transform.aspect(), 0.5);
}

#[test]
fn pointer_over_element_hits_its_plane() {
    let mut camera = Camera::default();
    camera.resize(800.0, 600.0);
    let rect = ElementRect {
        left: 200.0,
        top: 150.0,
        width: 400.0,
        height: 300.0,
    };
    let plane = PlaneTransform::from_rect(rect, 1.0, Vec2::new(800.0, 600.0));

    // Client (600, 300) is the right-hand edge midpoint of the element.
    let ndc = client_to_ndc(599.0, 300.0, 800.0, 600.0).unwrap();
    let local = intersect(&camera.ray_from_ndc(ndc), &plane.bounds()).unwrap();
    assert!(approx2(local, Vec2::new(0.4975, 0.0), 1e-2), "local = {local:?}");

    let ndc = client_to_ndc(50.0, 50.0, 800.0, 600.0).unwrap();
    assert_eq!(intersect(&camera.ray_from_ndc(ndc), &plane.bounds()), None);
}

#[test]
fn device_pixel_ratio_is_clamped() {
    assert_eq!(device_pixel_ratio(3.0, 2.0), 2.0);
    assert_eq!(device_pixel_ratio(1.5, 2.0), 1.5);
    assert_eq!(device_pixel_ratio(0.5, 2.0), 1.0);
    assert_eq!(device_pixel_ratio(f64::NAN, 2.0), 1.0);
    assert_eq!(device_pixel_ratio(-1.0, 2.0), 1.0);
}
