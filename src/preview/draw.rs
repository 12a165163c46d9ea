use raylib::ffi;
use raylib::prelude::*;
use crate::animation::LayerParams;
use crate::constants::CAPTION_FONT_SIZE;
use crate::engine::Frame;
use crate::media::ImageRef;
use crate::preview::labels::Labels;
use crate::preview::layer::Layer;
use crate::preview::layout::{Layout, REFERENCE_WIDTH};
use crate::story::StoryCategory;

type Typeface<'a> = &'a dyn AsRef<ffi::Font>;

const HEADER_LEFT: Color = Color::new(88, 28, 135, 255);
const HEADER_RIGHT: Color = Color::new(30, 58, 138, 255);
const BORDER: Color = Color::new(31, 41, 55, 255);
const MUTED: Color = Color::new(156, 163, 175, 255);
const HIGHLIGHT: Color = Color::new(59, 130, 246, 255);
const DESTRUCTIVE: Color = Color::new(220, 38, 38, 255);
const PLACEHOLDER: Color = Color::new(64, 64, 64, 255);

fn with_alpha(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, (alpha.clamp(0.0, 1.0) * color.a as f32) as u8)
}

/// Tint for a layer: brightness darkens below 1, opacity becomes alpha.
fn layer_tint(params: &LayerParams) -> Color {
    let level = (params.brightness.clamp(0.0, 1.0) * 255.0) as u8;
    with_alpha(Color::new(level, level, level, 255), params.opacity)
}

/// Offsets and alpha factor of the copies drawn to fake a blur.
fn ghost_offsets(blur: f32, k: f32) -> Vec<(Vector2, f32)> {
    if blur < 0.5 {
        return vec![(Vector2::new(0.0, 0.0), 1.0)];
    }
    let r = blur * 0.5 * k;
    let fade = 1.0 / (1.0 + blur * 0.1);
    vec![
        (Vector2::new(0.0, 0.0), fade),
        (Vector2::new(r, 0.0), fade * 0.4),
        (Vector2::new(-r, 0.0), fade * 0.4),
        (Vector2::new(0.0, r), fade * 0.4),
        (Vector2::new(0.0, -r), fade * 0.4),
    ]
}

// Source rectangle that crops a texture to fill a target of the given aspect
fn cover_source(texture: &Texture2D, target_aspect: f32) -> Rectangle {
    let tex_width = texture.width() as f32;
    let tex_height = texture.height() as f32;
    if tex_height <= 0.0 || target_aspect <= 0.0 {
        return Rectangle::new(0.0, 0.0, tex_width, tex_height);
    }
    if tex_width / tex_height > target_aspect {
        let width = tex_height * target_aspect;
        Rectangle::new((tex_width - width) * 0.5, 0.0, width, tex_height)
    } else {
        let height = tex_width / target_aspect;
        Rectangle::new(0.0, (tex_height - height) * 0.5, tex_width, height)
    }
}

fn text(d: &mut impl RaylibDraw, font: Typeface, content: &str, position: Vector2, size: f32, color: Color) {
    d.draw_text_ex(font, content, position, size, 1.0, color);
}

fn text_centered(d: &mut impl RaylibDraw, font: Typeface, content: &str, area: Rectangle, size: f32, color: Color) {
    let measured = measure_text_ex(font, content, size, 1.0);
    let position = Vector2::new(
        area.x + (area.width - measured.x) * 0.5,
        area.y + (area.height - measured.y) * 0.5,
    );
    text(d, font, content, position, size, color);
}

/// Draws one media entry into `dest`, rotated about the rectangle's center.
fn draw_entry(
    d: &mut impl RaylibDraw,
    font: Typeface,
    entry: &ImageRef<Texture2D>,
    dest: Rectangle,
    rotation: f32,
    tint: Color,
) {
    let origin = Vector2::new(dest.width * 0.5, dest.height * 0.5);
    match entry {
        ImageRef::Loaded { handle, .. } => {
            let source = cover_source(handle, dest.width / dest.height.max(1.0));
            d.draw_texture_pro(handle, source, dest, origin, rotation, tint);
        }
        ImageRef::Placeholder(n) => {
            d.draw_rectangle_pro(dest, origin, rotation, with_alpha(PLACEHOLDER, tint.a as f32 / 255.0));
            let label = format!("{}", n + 1);
            let area = Rectangle::new(dest.x - origin.x, dest.y - origin.y, dest.width, dest.height);
            text_centered(d, font, &label, area, (dest.height * 0.3).max(10.0), with_alpha(MUTED, tint.a as f32 / 255.0));
        }
        ImageRef::Broken { .. } => {
            let area = Rectangle::new(dest.x - origin.x, dest.y - origin.y, dest.width, dest.height);
            d.draw_rectangle_pro(dest, origin, rotation, with_alpha(Color::BLACK, tint.a as f32 / 255.0));
            d.draw_rectangle_lines_ex(area, 2.0, with_alpha(DESTRUCTIVE, tint.a as f32 / 255.0));
            let name = entry.file_name().unwrap_or_default();
            text_centered(d, font, &name, area, (dest.height * 0.08).clamp(10.0, 20.0), with_alpha(DESTRUCTIVE, tint.a as f32 / 255.0));
        }
    }
}

fn draw_image_layer(d: &mut impl RaylibDraw, font: Typeface, area: Rectangle, entry: &ImageRef<Texture2D>, params: LayerParams) {
    let k = area.width / REFERENCE_WIDTH;
    let width = area.width * params.scale;
    let height = area.height * params.scale;
    let center = Vector2::new(
        area.x + area.width * 0.5 + params.x * k,
        area.y + area.height * 0.5 + params.y * k,
    );
    let tint = layer_tint(&params);

    for (offset, fade) in ghost_offsets(params.blur, k) {
        let dest = Rectangle::new(center.x + offset.x, center.y + offset.y, width, height);
        draw_entry(d, font, entry, dest, params.rotation, with_alpha(tint, fade));
    }

    // Over-exposure
    if params.brightness > 1.0 {
        let dest = Rectangle::new(center.x, center.y, width, height);
        let glare = ((params.brightness - 1.0) * params.opacity).min(1.0);
        d.draw_rectangle_pro(dest, Vector2::new(width * 0.5, height * 0.5), params.rotation, with_alpha(Color::WHITE, glare));
    }
}

fn draw_text_layer(d: &mut impl RaylibDraw, font: Typeface, area: Rectangle, caption: &str, params: LayerParams) {
    let k = area.width / REFERENCE_WIDTH;
    let size = CAPTION_FONT_SIZE * k * params.scale;
    if size < 1.0 || params.opacity <= 0.0 {
        return;
    }

    let measured = measure_text_ex(font, caption, size, 1.0);
    let padding = Vector2::new(24.0 * k * params.scale, 12.0 * k * params.scale);
    let box_size = Vector2::new(measured.x + padding.x * 2.0, measured.y + padding.y * 2.0);
    let center = Vector2::new(
        area.x + area.width * 0.5 + params.x * k,
        area.y + area.height * 0.5 + params.y * k,
    );

    d.draw_rectangle_pro(
        Rectangle::new(center.x, center.y, box_size.x, box_size.y),
        Vector2::new(box_size.x * 0.5, box_size.y * 0.5),
        params.rotation,
        with_alpha(Color::BLACK, 0.5 * params.opacity),
    );

    let tint = layer_tint(&params);
    for (offset, fade) in ghost_offsets(params.blur, k) {
        d.draw_text_pro(
            font,
            caption,
            Vector2::new(center.x + offset.x, center.y + offset.y),
            Vector2::new(measured.x * 0.5, measured.y * 0.5),
            params.rotation,
            size,
            1.0,
            with_alpha(tint, fade),
        );
    }
}

fn draw_button(d: &mut impl RaylibDraw, font: Typeface, rect: Rectangle, label: &str, fill: Option<Color>, label_color: Color) {
    match fill {
        Some(fill) => d.draw_rectangle_rounded(rect, 0.2, 8, fill),
        None => d.draw_rectangle_lines_ex(rect, 1.0, BORDER),
    }
    text_centered(d, font, label, rect, 18.0, label_color);
}

fn draw_header(d: &mut impl RaylibDraw, font: Typeface, layout: &Layout) {
    let header = layout.header;
    d.draw_rectangle_gradient_h(
        header.x as i32,
        header.y as i32,
        header.width as i32,
        header.height as i32,
        HEADER_LEFT,
        HEADER_RIGHT,
    );
    text(d, font, "MAD Creator", Vector2::new(16.0, 14.0), 28.0, Color::WHITE);

    // Save and Share have no behaviour yet; only their icons are drawn
    for rect in [layout.save_button, layout.share_button] {
        let cx = (rect.x + rect.width * 0.5) as i32;
        let cy = (rect.y + rect.height * 0.5) as i32;
        d.draw_circle_lines(cx, cy, rect.width * 0.5, Color::WHITE);
    }
    let save = layout.save_button;
    d.draw_rectangle_lines_ex(
        Rectangle::new(save.x + save.width * 0.35, save.y + save.height * 0.35, save.width * 0.3, save.height * 0.3),
        1.5,
        Color::WHITE,
    );
    let share = layout.share_button;
    let dots = [
        Vector2::new(share.x + share.width * 0.65, share.y + share.height * 0.35),
        Vector2::new(share.x + share.width * 0.35, share.y + share.height * 0.5),
        Vector2::new(share.x + share.width * 0.65, share.y + share.height * 0.65),
    ];
    d.draw_line_v(dots[1], dots[0], Color::WHITE);
    d.draw_line_v(dots[1], dots[2], Color::WHITE);
    for dot in dots {
        d.draw_circle_v(dot, 2.5, Color::WHITE);
    }
}

fn draw_stories(d: &mut impl RaylibDraw, font: Typeface, layout: &Layout, labels: &Labels, selected: StoryCategory) {
    text(d, font, labels.story_title, layout.story_title, 20.0, Color::WHITE);

    for (tab, story) in layout.story_tabs.iter().zip(StoryCategory::ALL) {
        let (fill, color) = if story == selected {
            (Some(BORDER), Color::WHITE)
        } else {
            (None, MUTED)
        };
        draw_button(d, font, *tab, labels.story_label(story), fill, color);
    }

    text(d, font, labels.story_description(selected), layout.story_description, 16.0, MUTED);
}

fn draw_thumbnails(d: &mut impl RaylibDraw, font: Typeface, layout: &Layout, frame: &Frame<'_, Texture2D>, scroll: f32) {
    for (i, entry) in frame.thumbnails.iter().enumerate() {
        let rect = layout.thumbnail_rect(i, scroll);
        let dest = Rectangle::new(rect.x + rect.width * 0.5, rect.y + rect.height * 0.5, rect.width, rect.height);
        draw_entry(d, font, entry, dest, 0.0, Color::WHITE);
        if i == frame.highlighted {
            d.draw_rectangle_lines_ex(rect, 2.0, HIGHLIGHT);
        }
    }
}

/// Everything the preview shows for one engine frame.
pub struct Scene<'a> {
    pub layout: &'a Layout,
    pub labels: &'a Labels,
    pub frame: &'a Frame<'a, Texture2D>,
    pub image_layer: &'a Layer<usize>,
    pub text_layer: &'a Layer<&'static str>,
    pub thumbnail_scroll: f32,
}

pub fn draw_scene(d: &mut RaylibDrawHandle, font: Typeface, scene: &Scene) {
    let Scene { layout, labels, frame, image_layer, text_layer, thumbnail_scroll } = scene;
    let preview = layout.preview;

    d.clear_background(Color::BLACK);
    draw_header(d, font, layout);

    {
        let mut clip = d.begin_scissor_mode(
            preview.x as i32,
            preview.y as i32,
            preview.width as i32,
            preview.height as i32,
        );

        let (index, params) = image_layer.visible();
        // An upload may have shortened the sequence while the old image exits
        let entry = frame.thumbnails.get(*index).unwrap_or(frame.active_image);
        draw_image_layer(&mut clip, font, preview, entry, params);

        let (caption, params) = text_layer.visible();
        draw_text_layer(&mut clip, font, preview, caption, params);

        if frame.flash_opacity > 0.0 {
            clip.draw_rectangle_rec(preview, with_alpha(Color::WHITE, frame.flash_opacity));
        }
    }
    d.draw_rectangle_lines_ex(preview, 1.0, BORDER);

    draw_button(d, font, layout.upload_button, labels.upload, None, Color::WHITE);
    if frame.is_playing {
        draw_button(d, font, layout.play_button, labels.pause, Some(DESTRUCTIVE), Color::WHITE);
    } else {
        draw_button(d, font, layout.play_button, labels.play, Some(Color::WHITE), Color::BLACK);
    }
    draw_button(d, font, layout.reset_button, labels.reset, None, Color::WHITE);

    draw_stories(d, font, layout, labels, frame.story);

    let strip = layout.thumbnail_strip;
    let mut clip = d.begin_scissor_mode(strip.x as i32, strip.y as i32, strip.width as i32, strip.height as i32);
    draw_thumbnails(&mut clip, font, layout, frame, *thumbnail_scroll);
}
