//! Draw-list generation for 2D primitives
//!
//! Turns a [`Snapshot`] into backend-neutral commands. The wasm host replays
//! them on a canvas; tests inspect them directly.

use glam::Vec2;

use crate::Settings;
use crate::sim::{ExplosionKind, GameEvent, SessionStatus, Snapshot};

/// Color with 8-bit channels and float alpha (canvas style)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// CSS color string, e.g. `rgba(255, 107, 107, 0.50)`
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {:.2})", self.r, self.g, self.b, self.a)
    }
}

pub mod palette {
    use super::Rgba;

    pub const BACKGROUND: Rgba = Rgba::rgb(12, 16, 32);
    pub const FIGHTER: Rgba = Rgba::rgb(78, 205, 196);
    pub const PROJECTILE: Rgba = Rgba::rgb(254, 202, 87);
    pub const ENEMY: Rgba = Rgba::rgb(255, 107, 107);
    pub const KILL_EXPLOSION: Rgba = Rgba::rgb(255, 159, 67);
    pub const IMPACT_EXPLOSION: Rgba = Rgba::rgb(255, 56, 56);
    pub const FLASH: Rgba = Rgba::rgb(255, 0, 0);
    pub const TEXT: Rgba = Rgba::rgb(240, 240, 240);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear { color: Rgba },
    Rect { center: Vec2, size: Vec2, color: Rgba },
    Triangle { points: [Vec2; 3], color: Rgba },
    /// Stroked ring
    Circle { center: Vec2, radius: f32, width: f32, color: Rgba },
    Text { pos: Vec2, text: String, size: f32, align: TextAlign, color: Rgba },
}

/// Host-side transient effects driven by game events
#[derive(Debug, Clone, Default)]
pub struct FrameEffects {
    /// Hit flash intensity, 0-1
    pub flash: f32,
}

impl FrameEffects {
    pub fn on_event(&mut self, event: &GameEvent, settings: &Settings) {
        if let GameEvent::FighterHit { .. } = event {
            if settings.effective_hit_flash() {
                self.flash = 1.0;
            }
        }
    }

    /// Decay once per rendered frame
    pub fn advance(&mut self) {
        self.flash *= 0.85;
        if self.flash < 0.01 {
            self.flash = 0.0;
        }
    }
}

/// Upward-pointing triangle filling the box
fn ship(center: Vec2, size: Vec2) -> [Vec2; 3] {
    let h = size * 0.5;
    [
        Vec2::new(center.x, center.y - h.y),
        Vec2::new(center.x + h.x, center.y + h.y),
        Vec2::new(center.x - h.x, center.y + h.y),
    ]
}

/// Downward-pointing triangle filling the box
fn raider(center: Vec2, size: Vec2) -> [Vec2; 3] {
    let h = size * 0.5;
    [
        Vec2::new(center.x - h.x, center.y - h.y),
        Vec2::new(center.x + h.x, center.y - h.y),
        Vec2::new(center.x, center.y + h.y),
    ]
}

fn text(pos: Vec2, text: String, size: f32, align: TextAlign) -> DrawCmd {
    DrawCmd::Text {
        pos,
        text,
        size,
        align,
        color: palette::TEXT,
    }
}

/// Build the full frame for one snapshot
pub fn build_frame(snap: &Snapshot<'_>, settings: &Settings, effects: &FrameEffects) -> Vec<DrawCmd> {
    let mut cmds = Vec::with_capacity(
        4 + snap.projectiles.len() + snap.enemies.len() + snap.explosions.len(),
    );
    let w = snap.field.width();
    let h = snap.field.height();
    let center = Vec2::new(w * 0.5, h * 0.5);

    cmds.push(DrawCmd::Clear {
        color: palette::BACKGROUND,
    });

    for p in snap.projectiles {
        cmds.push(DrawCmd::Rect {
            center: p.pos,
            size: p.size,
            color: palette::PROJECTILE,
        });
    }

    for e in snap.enemies {
        cmds.push(DrawCmd::Triangle {
            points: raider(e.pos, e.size),
            color: palette::ENEMY,
        });
    }

    if let Some(f) = snap.fighter {
        cmds.push(DrawCmd::Triangle {
            points: ship(f.pos, f.size),
            color: palette::FIGHTER,
        });
    }

    if settings.explosions {
        for x in snap.explosions {
            let base = match x.kind {
                ExplosionKind::Kill => palette::KILL_EXPLOSION,
                ExplosionKind::Impact => palette::IMPACT_EXPLOSION,
            };
            cmds.push(DrawCmd::Circle {
                center: x.pos,
                radius: x.radius,
                width: 3.0,
                color: base.with_alpha(x.alpha),
            });
        }
    }

    if effects.flash > 0.0 {
        cmds.push(DrawCmd::Rect {
            center,
            size: Vec2::new(w, h),
            color: palette::FLASH.with_alpha(effects.flash * 0.4),
        });
    }

    if settings.show_hud && snap.status == SessionStatus::Running {
        cmds.push(text(Vec2::new(12.0, 28.0), format!("Score: {}", snap.score), 20.0, TextAlign::Left));
        cmds.push(text(
            Vec2::new(w - 12.0, 28.0),
            format!("Lives: {}", snap.lives),
            20.0,
            TextAlign::Right,
        ));
    }

    match snap.status {
        SessionStatus::Idle => {
            cmds.push(text(center, "Press Start to play".into(), 28.0, TextAlign::Center));
        }
        SessionStatus::Ended => {
            cmds.push(text(center - Vec2::new(0.0, 40.0), "Game Over!".into(), 36.0, TextAlign::Center));
            cmds.push(text(
                center,
                format!("Final Score: {}", snap.score),
                24.0,
                TextAlign::Center,
            ));
            cmds.push(text(
                center + Vec2::new(0.0, 32.0),
                format!("Survived: {}s", snap.elapsed_secs()),
                20.0,
                TextAlign::Center,
            ));
        }
        SessionStatus::Running => {}
    }

    cmds
}
