//! Demo scenes.

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use viz_scene::{Animation, Axis, Node, OrbitPlane, PointLight, Transform};

use crate::shapes::{ShapeConfig, TracedMesh};

/// The scenes the host can switch between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DemoScene {
    TwoSpheres,
    HeartOrbit,
    Gallery,
}

impl DemoScene {
    pub const ALL: [DemoScene; 3] = [
        DemoScene::TwoSpheres,
        DemoScene::HeartOrbit,
        DemoScene::Gallery,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DemoScene::TwoSpheres => "two_spheres",
            DemoScene::HeartOrbit => "heart_orbit",
            DemoScene::Gallery => "gallery",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|scene| scene.name() == name)
    }

    pub fn build(self) -> Node {
        match self {
            DemoScene::TwoSpheres => two_spheres(),
            DemoScene::HeartOrbit => heart_orbit(),
            DemoScene::Gallery => gallery(),
        }
    }
}

fn light_at(name: &str, x: f32, y: f32, z: f32) -> Node {
    Node::transform(format!("{name}_parent"), Transform::translate(x, y, z))
        .with_child(Node::light(name, PointLight::new(Vec3::ONE)))
}

/// Two spheres and a light, placed by plain translations.
fn two_spheres() -> Node {
    let config = ShapeConfig::default();
    Node::group("root")
        .with_child(
            Node::transform("translate_1", Transform::translate(3.0, 0.0, 0.0))
                .with_child(Node::geometry("sphere_1", TracedMesh::new("sphere_1", &config))),
        )
        .with_child(
            Node::transform("translate_2", Transform::translate(-3.0, 3.0, 0.0))
                .with_child(Node::geometry("sphere_2", TracedMesh::new("sphere_2", &config))),
        )
        .with_child(light_at("light", 0.0, 3.0, 5.0))
}

/// An upright rectangle with hearts orbiting around it.
fn heart_orbit() -> Node {
    let rectangle = Node::transform("center_rectangle", Transform::translate(0.0, 0.0, 0.0))
        .with_child(
            Node::transform(
                "rectangle_rotation",
                Transform::composite([
                    Transform::rotate_degrees(Vec3::X, 90.0),
                    Transform::rotate_degrees(Vec3::Z, 90.0),
                ]),
            )
            .with_child(Node::geometry(
                "rectangle",
                TracedMesh::new("rectangle", &ShapeConfig::default()),
            )),
        );

    let heart_config = ShapeConfig::with_color(Vec3::new(1.0, 0.2, 0.4));
    let hearts = (0..4).map(|i| {
        let phase = i as f32 * FRAC_PI_2;
        Node::transform("heart", Transform::translate(0.0, 0.0, 0.0))
            .with_animation(Animation::orbit(phase, 0.8, 5.0, OrbitPlane::XY))
            .with_child(Node::geometry("heart", TracedMesh::new("heart", &heart_config)))
    });

    Node::group("heart_orbit_root")
        .with_child(rectangle)
        .with_children(hearts)
        .with_child(light_at("light", 30.0, 30.0, 30.0))
}

/// A row of shapes, each with a different animation.
fn gallery() -> Node {
    let config = ShapeConfig::with_color(Vec3::new(0.2, 0.6, 1.0));
    Node::group("gallery_root")
        .with_child(
            Node::transform("torus_slot", Transform::translate(-4.0, 0.0, 0.0)).with_child(
                Node::transform("torus_spin", Transform::rotate_degrees(Vec3::Y, 0.0))
                    .with_animation(Animation::spin(45.0))
                    .with_child(Node::geometry("torus", TracedMesh::new("torus", &config))),
            ),
        )
        .with_child(
            Node::transform("cone_pulse", Transform::uniform_scale(1.0))
                .with_animation(Animation::pulse(0.5, 1.5, 2.0))
                .with_child(Node::geometry("cone", TracedMesh::new("cone", &config))),
        )
        .with_child(
            Node::transform("cube_bounce", Transform::translate(4.0, 0.0, 0.0))
                .with_animation(Animation::ping_pong(Axis::Y, 1.5, 1.5, 0.0))
                .with_child(Node::geometry("cube", TracedMesh::new("cube", &config))),
        )
        .with_child(light_at("light", 0.0, 10.0, 10.0))
}
