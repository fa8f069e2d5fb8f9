use std::f32::consts::{PI, TAU};

use nusa_content::ContentTables;
use nusa_geom::{Rgb, Vec3};
use nusa_locomotion::Obstacle;
use rand::Rng;

use crate::loader::{ModelHandle, ModelLoader};

/// Sizes and rates for a province world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldLayout {
    pub platform_radius: f32,
    pub platform_thickness: f32,
    pub platform_color: Rgb,
    pub ring_inner: f32,
    pub ring_outer: f32,
    pub ring_color: Rgb,
    pub caption_height: f32,
    pub caption_bob: f32,
    pub particle_count: usize,
    pub particle_inner: f32,
    pub particle_outer: f32,
    pub particle_max_height: f32,
    /// Radians per second.
    pub particle_spin: f32,
    pub floating_count: usize,
    pub orbit_radii: [f32; 2],
    pub floating_min_height: f32,
    pub floating_max_height: f32,
    /// Max self-rotation rate per axis, radians per second.
    pub floating_spin: f32,
    /// Orbit advance, radians per second.
    pub orbit_speed: f32,
}

impl Default for WorldLayout {
    fn default() -> Self {
        Self {
            platform_radius: 12.0,
            platform_thickness: 0.5,
            platform_color: Rgb::from_hex(0x1e293b),
            ring_inner: 11.5,
            ring_outer: 12.0,
            ring_color: Rgb::from_hex(0x3b82f6),
            caption_height: 5.0,
            caption_bob: 0.5,
            particle_count: 120,
            particle_inner: 13.0,
            particle_outer: 30.0,
            particle_max_height: 10.0,
            particle_spin: 0.1,
            floating_count: 12,
            orbit_radii: [16.0, 22.0],
            floating_min_height: 2.0,
            floating_max_height: 8.0,
            floating_spin: 0.6,
            orbit_speed: 0.12,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles (x, y, z) in radians.
    pub rotation: Vec3,
    pub scale: f32,
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

/// What to draw for a model slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Visual {
    Model(ModelHandle),
    /// Unit cube stand-in for a model that failed to load.
    Cube { color: Rgb },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Position relative to the world origin before the field's spin.
    pub offset: Vec3,
    pub color: Rgb,
}

#[derive(Clone, Debug, PartialEq)]
pub enum WorldChildKind {
    PlatformBase {
        radius: f32,
        thickness: f32,
        color: Rgb,
    },
    BoundaryRing {
        inner: f32,
        outer: f32,
        color: Rgb,
    },
    Caption {
        text: String,
        base_height: f32,
        bob: f32,
    },
    Particles {
        points: Vec<Particle>,
        spin: f32,
    },
    Floating {
        visual: Visual,
        spin: Vec3,
        orbit_radius: f32,
        orbit_angle: f32,
        orbit_speed: f32,
    },
    Platform {
        visual: Visual,
        spin: f32,
        obstacle_radius: f32,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct WorldChild {
    pub transform: Transform,
    pub kind: WorldChildKind,
}

/// Everything shown while inside a province. Holds model handles, so it must
/// be torn down through the loader that produced them.
#[derive(Debug)]
pub struct ProvinceWorld {
    province_index: usize,
    name: String,
    children: Vec<WorldChild>,
    time: f32,
    fallbacks: usize,
}

impl ProvinceWorld {
    pub fn build<R: Rng>(
        province_index: usize,
        name: &str,
        content: &ContentTables,
        loader: &mut dyn ModelLoader,
        rng: &mut R,
        layout: &WorldLayout,
    ) -> Self {
        let mut world = ProvinceWorld {
            province_index,
            name: name.to_string(),
            children: Vec::new(),
            time: 0.0,
            fallbacks: 0,
        };

        world.children.push(WorldChild {
            transform: Transform::at(Vec3::new(0.0, -layout.platform_thickness * 0.5, 0.0)),
            kind: WorldChildKind::PlatformBase {
                radius: layout.platform_radius,
                thickness: layout.platform_thickness,
                color: layout.platform_color,
            },
        });
        world.children.push(WorldChild {
            transform: Transform::at(Vec3::new(0.0, 0.01, 0.0)),
            kind: WorldChildKind::BoundaryRing {
                inner: layout.ring_inner,
                outer: layout.ring_outer,
                color: layout.ring_color,
            },
        });
        world.children.push(WorldChild {
            transform: Transform::at(Vec3::new(0.0, layout.caption_height, 0.0)),
            kind: WorldChildKind::Caption {
                text: name.to_string(),
                base_height: layout.caption_height,
                bob: layout.caption_bob,
            },
        });
        world.children.push(WorldChild {
            transform: Transform::at(Vec3::ZERO),
            kind: WorldChildKind::Particles {
                points: scatter_particles(rng, layout),
                spin: layout.particle_spin,
            },
        });

        let candidates = content.floating_models(province_index);
        for i in 0..layout.floating_count {
            let orbit_radius = layout.orbit_radii[i % 2];
            let orbit_angle = i as f32 / layout.floating_count.max(1) as f32 * TAU;
            let height = rng.gen_range(layout.floating_min_height..=layout.floating_max_height);
            let (visual, scale) = match candidates.get(rng.gen_range(0..candidates.len().max(1))) {
                Some(spec) => (
                    world.load_or_cube(loader, rng, &spec.path),
                    spec.scale.unwrap_or(1.0),
                ),
                None => (world.cube(rng), 1.0),
            };
            let max = layout.floating_spin;
            world.children.push(WorldChild {
                transform: Transform {
                    position: orbit_position(orbit_radius, orbit_angle, height),
                    rotation: Vec3::new(
                        rng.gen_range(0.0..PI),
                        rng.gen_range(0.0..PI),
                        rng.gen_range(0.0..PI),
                    ),
                    scale,
                },
                kind: WorldChildKind::Floating {
                    visual,
                    spin: Vec3::new(
                        rng.gen_range(-max..=max),
                        rng.gen_range(-max..=max),
                        rng.gen_range(-max..=max),
                    ),
                    orbit_radius,
                    orbit_angle,
                    orbit_speed: layout.orbit_speed,
                },
            });
        }

        for placed in content.platform_models(province_index) {
            let visual = world.load_or_cube(loader, rng, &placed.path);
            let obstacle = Obstacle::from_scale(placed.position, placed.scale);
            world.children.push(WorldChild {
                transform: Transform {
                    position: placed.position,
                    rotation: placed.rotation,
                    scale: placed.scale.unwrap_or(1.0),
                },
                kind: WorldChildKind::Platform {
                    visual,
                    spin: placed.spin,
                    obstacle_radius: obstacle.radius,
                },
            });
        }

        log::info!(
            "world for {} (#{}) built: {} children, {} placeholder cubes",
            world.name,
            province_index,
            world.children.len(),
            world.fallbacks
        );
        world
    }

    fn load_or_cube<R: Rng>(&mut self, loader: &mut dyn ModelLoader, rng: &mut R, path: &str) -> Visual {
        match loader.load(path) {
            Ok(handle) => Visual::Model(handle),
            Err(err) => {
                log::warn!("{}; using a placeholder cube", err);
                self.cube(rng)
            }
        }
    }

    fn cube<R: Rng>(&mut self, rng: &mut R) -> Visual {
        self.fallbacks += 1;
        Visual::Cube {
            color: Rgb::from_hex(rng.gen_range(0..0x0100_0000)),
        }
    }

    #[inline]
    pub fn province_index(&self) -> usize {
        self.province_index
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn children(&self) -> &[WorldChild] {
        &self.children
    }

    /// Number of model slots that fell back to a cube.
    #[inline]
    pub fn placeholder_count(&self) -> usize {
        self.fallbacks
    }

    /// Collision circles of the platform objects.
    pub fn obstacles(&self) -> Vec<Obstacle> {
        self.children
            .iter()
            .filter_map(|c| match c.kind {
                WorldChildKind::Platform {
                    obstacle_radius, ..
                } => Some(Obstacle {
                    position: c.transform.position,
                    radius: obstacle_radius,
                }),
                _ => None,
            })
            .collect()
    }

    /// Per-frame motion. Touches nothing outside the world.
    pub fn animate(&mut self, dt: f32, eye: Vec3) {
        self.time += dt;
        let time = self.time;
        for child in &mut self.children {
            let t = &mut child.transform;
            match &mut child.kind {
                WorldChildKind::PlatformBase { .. } | WorldChildKind::BoundaryRing { .. } => {}
                WorldChildKind::Caption {
                    base_height, bob, ..
                } => {
                    t.position.y = *base_height + time.sin() * *bob;
                    let to_eye = eye - t.position;
                    let flat = (to_eye.x * to_eye.x + to_eye.z * to_eye.z).sqrt();
                    t.rotation = Vec3::new(-to_eye.y.atan2(flat), to_eye.x.atan2(to_eye.z), 0.0);
                }
                WorldChildKind::Particles { spin, .. } => {
                    t.rotation.y = (t.rotation.y + *spin * dt) % TAU;
                }
                WorldChildKind::Floating {
                    spin,
                    orbit_radius,
                    orbit_angle,
                    orbit_speed,
                    ..
                } => {
                    t.rotation += *spin * dt;
                    *orbit_angle = (*orbit_angle + *orbit_speed * dt) % TAU;
                    t.position = orbit_position(*orbit_radius, *orbit_angle, t.position.y);
                }
                WorldChildKind::Platform { spin, .. } => {
                    if *spin != 0.0 {
                        t.rotation.y += *spin * dt;
                    }
                }
            }
        }
    }

    /// Releases every model handle.
    pub fn teardown(self, loader: &mut dyn ModelLoader) {
        let mut released = 0usize;
        for child in self.children {
            if let WorldChildKind::Floating {
                visual: Visual::Model(handle),
                ..
            }
            | WorldChildKind::Platform {
                visual: Visual::Model(handle),
                ..
            } = child.kind
            {
                loader.release(handle);
                released += 1;
            }
        }
        log::info!("world for {} torn down, {} models released", self.name, released);
    }
}

#[inline]
fn orbit_position(radius: f32, angle: f32, height: f32) -> Vec3 {
    Vec3::new(angle.cos() * radius, height, angle.sin() * radius)
}

fn scatter_particles<R: Rng>(rng: &mut R, layout: &WorldLayout) -> Vec<Particle> {
    let r0 = layout.particle_inner * layout.particle_inner;
    let r1 = layout.particle_outer * layout.particle_outer;
    (0..layout.particle_count)
        .map(|_| {
            // Uniform over the annulus area.
            let r = rng.gen_range(r0..r1).sqrt();
            let a = rng.gen_range(0.0..TAU);
            Particle {
                offset: Vec3::new(
                    a.cos() * r,
                    rng.gen_range(0.0..layout.particle_max_height),
                    a.sin() * r,
                ),
                color: Rgb::from_hsl(rng.r#gen::<f32>(), 1.0, 0.7),
            }
        })
        .collect()
}
