//! Integration tests for frame rendering over whole scene trees.

use std::cell::RefCell;
use std::rc::Rc;

use glam::{Mat4, Vec2, Vec3, Vec4};

use viz_core::{EngineConfig, Error, Result};
use viz_renderer::{FrameInput, Renderer};
use viz_scene::{Animation, Drawable, Light, Node, Transform};

/// Everything a mock shape was handed during rendering.
#[derive(Default)]
struct ShapeLog {
    projections: Vec<Mat4>,
    views: Vec<Mat4>,
    models: Vec<Mat4>,
    draws: usize,
    lighting: Vec<Vec3>,
    position: Vec3,
}

type SharedLog = Rc<RefCell<ShapeLog>>;

struct MockMesh {
    log: SharedLog,
    fail_draw: bool,
}

impl MockMesh {
    fn new() -> (Self, SharedLog) {
        let log = SharedLog::default();
        (
            Self {
                log: log.clone(),
                fail_draw: false,
            },
            log,
        )
    }
}

impl Drawable for MockMesh {
    fn transform(&mut self, projection: Mat4, view: Mat4, model: Mat4) -> Result<()> {
        let mut log = self.log.borrow_mut();
        log.projections.push(projection);
        log.views.push(view);
        log.models.push(model);
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        if self.fail_draw {
            return Err(Error::Shape("mock draw failure".into()));
        }
        self.log.borrow_mut().draws += 1;
        Ok(())
    }

    fn lighting(&mut self, color: Vec3) {
        self.log.borrow_mut().lighting.push(color);
    }
}

struct MockLight {
    color: Vec3,
    log: SharedLog,
}

impl MockLight {
    fn new(color: Vec3) -> (Self, SharedLog) {
        let log = SharedLog::default();
        (
            Self {
                color,
                log: log.clone(),
            },
            log,
        )
    }
}

impl Light for MockLight {
    fn transform(&mut self, projection: Mat4, view: Mat4, model: Mat4) -> Result<()> {
        let mut log = self.log.borrow_mut();
        log.projections.push(projection);
        log.views.push(view);
        log.models.push(model);
        Ok(())
    }

    fn color(&self) -> Vec3 {
        self.color
    }

    fn position(&self) -> Vec3 {
        self.log.borrow().position
    }

    fn set_position(&mut self, position: Vec3) {
        self.log.borrow_mut().position = position;
    }

    fn draw(&mut self) -> Result<()> {
        self.log.borrow_mut().draws += 1;
        Ok(())
    }
}

fn frame() -> FrameInput {
    FrameInput::new(1000, 1000, 1.0 / 60.0)
}

fn white_light() -> Node {
    Node::light("light", MockLight::new(Vec3::ONE).0)
}

#[test]
fn test_translated_sphere_receives_translation_column() {
    let (sphere, log) = MockMesh::new();
    let root = Node::group("root")
        .with_child(
            Node::transform("translate_1", Transform::translate(3.0, 0.0, 0.0))
                .with_child(Node::geometry("sphere_a", sphere)),
        )
        .with_child(white_light());

    let mut renderer = Renderer::new(&EngineConfig::default());
    renderer.set_scene(root);
    renderer.render(frame()).expect("frame should render");

    let log = log.borrow();
    assert_eq!(log.models.len(), 1);
    assert_eq!(log.draws, 1);
    assert_eq!(log.models[0].w_axis, Vec4::new(3.0, 0.0, 0.0, 1.0));
}

#[test]
fn test_shapes_receive_active_view_and_projection() {
    let (mesh, log) = MockMesh::new();
    let mut renderer = Renderer::new(&EngineConfig::default());
    renderer.set_scene(
        Node::group("root")
            .with_child(Node::geometry("mesh", mesh))
            .with_child(white_light()),
    );

    renderer.render(frame()).unwrap();
    renderer.set_use_trackball(true);
    renderer.render(frame()).unwrap();

    let input = frame();
    let log = log.borrow();
    assert_eq!(log.views[0], renderer.camera().view_matrix());
    assert_eq!(log.projections[0], renderer.camera().projection_matrix(1.0));
    assert_eq!(log.views[1], renderer.trackball().view_matrix());
    assert_eq!(
        log.projections[1],
        renderer.trackball().projection_matrix(input.window_size)
    );
}

#[test]
fn test_collects_three_lights_and_five_meshes() {
    let mesh = || Node::geometry("mesh", MockMesh::new().0);
    let light = || Node::light("light", MockLight::new(Vec3::ONE).0);

    let root = Node::group("root")
        .with_child(mesh())
        .with_child(
            Node::transform("a", Transform::translate(1.0, 0.0, 0.0))
                .with_child(light())
                .with_child(
                    Node::transform("b", Transform::rotate_degrees(Vec3::Y, 45.0))
                        .with_child(mesh())
                        .with_child(
                            Node::transform("c", Transform::uniform_scale(0.5))
                                .with_child(mesh())
                                .with_child(light()),
                        ),
                ),
        )
        .with_child(
            Node::group("d")
                .with_child(mesh())
                .with_child(Node::group("e").with_child(light()).with_child(mesh())),
        );

    let mut renderer = Renderer::new(&EngineConfig::default());
    renderer.set_scene(root);
    let stats = renderer.render(frame()).unwrap();
    assert_eq!(stats.lights, 3);
    assert_eq!(stats.meshes, 5);

    // Collection is rebuilt every frame, not accumulated
    let stats = renderer.render(frame()).unwrap();
    assert_eq!(stats.lights, 3);
    assert_eq!(stats.meshes, 5);
}

#[test]
fn test_scene_without_light_fails_loudly() {
    let (mesh, log) = MockMesh::new();
    let mut renderer = Renderer::new(&EngineConfig::default());
    renderer.set_scene(Node::group("root").with_child(Node::geometry("mesh", mesh)));

    let result = renderer.render(frame());
    assert!(matches!(result, Err(Error::MissingLight)));
    // Nothing was drawn for the failed frame
    assert_eq!(log.borrow().draws, 0);
    assert!(log.borrow().lighting.is_empty());
}

#[test]
fn test_first_light_color_applied_to_every_mesh() {
    let (a, log_a) = MockMesh::new();
    let (b, log_b) = MockMesh::new();
    let red = Vec3::new(1.0, 0.0, 0.0);
    let blue = Vec3::new(0.0, 0.0, 1.0);

    let root = Node::group("root")
        .with_child(Node::geometry("a", a))
        .with_child(Node::light("first", MockLight::new(red).0))
        .with_child(
            Node::transform("t", Transform::translate(0.0, 1.0, 0.0))
                .with_child(Node::geometry("b", b))
                .with_child(Node::light("second", MockLight::new(blue).0)),
        );

    let mut renderer = Renderer::new(&EngineConfig::default());
    renderer.set_scene(root);
    renderer.render(frame()).unwrap();

    assert_eq!(log_a.borrow().lighting, vec![red]);
    assert_eq!(log_b.borrow().lighting, vec![red]);
}

#[test]
fn test_light_world_position_tracks_placement() {
    let (light, log) = MockLight::new(Vec3::ONE);
    let root = Node::group("root").with_child(
        Node::transform("translate_3", Transform::translate(0.0, 3.0, 5.0))
            .with_child(
                Node::transform("spin", Transform::rotate_degrees(Vec3::Y, 90.0))
                    .with_child(Node::light("light", light)),
            ),
    );

    let mut renderer = Renderer::new(&EngineConfig::default());
    renderer.set_scene(root);
    renderer.render(frame()).unwrap();

    let log = log.borrow();
    assert!((log.position - Vec3::new(0.0, 3.0, 5.0)).length() < 1e-5);
    assert_eq!(log.draws, 1);
}

#[test]
fn test_animation_advances_with_frame_dt() {
    let (mesh, log) = MockMesh::new();
    let root = Node::group("root")
        .with_child(
            Node::transform("mover", Transform::translate(0.0, 0.0, 0.0))
                .with_animation(Animation::custom(|transform, dt| {
                    if let Transform::Translate(offset) = transform {
                        offset.x += dt;
                    }
                }))
                .with_child(Node::geometry("mesh", mesh)),
        )
        .with_child(white_light());

    let mut renderer = Renderer::new(&EngineConfig::default());
    renderer.set_scene(root);
    renderer.render(FrameInput::new(800, 600, 0.5)).unwrap();
    renderer.render(FrameInput::new(800, 600, 0.25)).unwrap();

    let log = log.borrow();
    assert_eq!(log.models[0].w_axis.x, 0.5);
    assert_eq!(log.models[1].w_axis.x, 0.75);
}

#[test]
fn test_shape_failure_aborts_frame() {
    let (mut broken, _) = MockMesh::new();
    broken.fail_draw = true;
    let (after, log_after) = MockMesh::new();

    let mut renderer = Renderer::new(&EngineConfig::default());
    renderer.set_scene(
        Node::group("root")
            .with_child(white_light())
            .with_child(Node::geometry("broken", broken))
            .with_child(Node::geometry("after", after)),
    );

    let result = renderer.render(frame());
    assert!(matches!(result, Err(Error::Shape(_))));
    assert_eq!(log_after.borrow().draws, 0);
    assert_eq!(renderer.frame_count(), 0);
}

#[test]
fn test_scene_swap_releases_previous_tree() {
    let (mesh, log) = MockMesh::new();
    let mut renderer = Renderer::new(&EngineConfig::default());
    renderer.set_scene(
        Node::group("first")
            .with_child(Node::geometry("mesh", mesh))
            .with_child(white_light()),
    );
    renderer.render(frame()).unwrap();
    assert_eq!(Rc::strong_count(&log), 2);

    renderer.set_scene(Node::group("second").with_child(white_light()));
    assert_eq!(Rc::strong_count(&log), 1);
    assert_eq!(renderer.scene().map(Node::name), Some("second"));
    let stats = renderer.render(frame()).unwrap();
    assert_eq!(stats.meshes, 0);
}

#[test]
fn test_navigation_input_changes_view() {
    let (mesh, log) = MockMesh::new();
    let mut renderer = Renderer::new(&EngineConfig {
        use_trackball: true,
        ..EngineConfig::default()
    });
    renderer.set_scene(
        Node::group("root")
            .with_child(Node::geometry("mesh", mesh))
            .with_child(white_light()),
    );

    renderer.render(frame()).unwrap();
    let window = frame().window_size;
    renderer.rotate_trackball(Vec2::new(500.0, 500.0), Vec2::new(600.0, 550.0), window);
    renderer.move_trackball(Vec2::ZERO, Vec2::new(20.0, 0.0));
    renderer.zoom_trackball(2.0, window.y);
    renderer.render(frame()).unwrap();

    let log = log.borrow();
    assert_ne!(log.views[0], log.views[1]);
    assert_ne!(log.projections[0], log.projections[1]);
}
