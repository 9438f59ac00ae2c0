//! Canvas 2D backend for draw lists

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::draw_list::{DrawCmd, TextAlign};

/// Replay a draw list on the given context
pub fn execute(ctx: &CanvasRenderingContext2d, width: f64, height: f64, cmds: &[DrawCmd]) {
    for cmd in cmds {
        match cmd {
            DrawCmd::Clear { color } => {
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill_rect(0.0, 0.0, width, height);
            }
            DrawCmd::Rect { center, size, color } => {
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill_rect(
                    (center.x - size.x * 0.5) as f64,
                    (center.y - size.y * 0.5) as f64,
                    size.x as f64,
                    size.y as f64,
                );
            }
            DrawCmd::Triangle { points, color } => {
                ctx.set_fill_style_str(&color.to_css());
                ctx.begin_path();
                ctx.move_to(points[0].x as f64, points[0].y as f64);
                ctx.line_to(points[1].x as f64, points[1].y as f64);
                ctx.line_to(points[2].x as f64, points[2].y as f64);
                ctx.close_path();
                ctx.fill();
            }
            DrawCmd::Circle {
                center,
                radius,
                width,
                color,
            } => {
                ctx.set_stroke_style_str(&color.to_css());
                ctx.set_line_width(*width as f64);
                ctx.begin_path();
                if let Err(err) = ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU) {
                    log::warn!("arc failed: {:?}", err);
                    continue;
                }
                ctx.stroke();
            }
            DrawCmd::Text {
                pos,
                text,
                size,
                align,
                color,
            } => {
                ctx.set_fill_style_str(&color.to_css());
                ctx.set_font(&format!("bold {}px sans-serif", size));
                ctx.set_text_align(match align {
                    TextAlign::Left => "left",
                    TextAlign::Center => "center",
                    TextAlign::Right => "right",
                });
                let _ = ctx.fill_text(text, pos.x as f64, pos.y as f64);
            }
        }
    }
}
