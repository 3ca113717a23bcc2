//! Rendering: hand every simulation-owned node to the host engine, then draw.

use camera::Camera;
use engine_core::{SceneNode, Transform};

use crate::session::Session;

/// Which simulation object a submitted node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Aircraft,
    /// Index into the session's target list; stable for the whole session.
    Target(usize),
    Projectile,
    ExplosionCore,
    ExplosionParticle,
}

/// The external scene-graph engine. It owns meshes, materials and the draw loop.
pub trait RenderHost {
    /// Update transform, visibility and opacity of one node for this frame.
    fn submit(&mut self, kind: NodeKind, node: &SceneNode);
    /// Draw one frame from `camera`. Called once per tick, after every `submit`.
    fn render_frame(&mut self, camera: &Camera);
}

/// Submit the whole scene and render one frame.
pub fn run(session: &Session, host: &mut dyn RenderHost) {
    host.submit(NodeKind::Aircraft, &SceneNode::new(session.aircraft().transform()));

    for (i, target) in session.targets().iter().enumerate() {
        // Wrecks stay in the list, hidden.
        let node = if target.destroyed {
            SceneNode::hidden(target.transform())
        } else {
            SceneNode::new(target.transform())
        };
        host.submit(NodeKind::Target(i), &node);
    }

    for projectile in session.weapons().projectiles() {
        host.submit(NodeKind::Projectile, &SceneNode::new(projectile.transform()));
    }

    for explosion in session.explosions().active() {
        host.submit(NodeKind::ExplosionCore, &explosion.core_node());
        for node in explosion.particle_nodes() {
            host.submit(NodeKind::ExplosionParticle, &node);
        }
    }

    host.render_frame(session.camera());
}

/// Render host that only counts what it was given, for headless runs and tests.
#[derive(Debug, Default, Clone)]
pub struct CountingHost {
    pub frames: u64,
    pub visible_nodes: usize,
    pub hidden_nodes: usize,
    pub last_eye: Option<Transform>,
}

impl RenderHost for CountingHost {
    fn submit(&mut self, _kind: NodeKind, node: &SceneNode) {
        if node.visible {
            self.visible_nodes += 1;
        } else {
            self.hidden_nodes += 1;
        }
    }

    fn render_frame(&mut self, camera: &Camera) {
        self.frames += 1;
        self.last_eye = Some(camera.transform);
    }
}
