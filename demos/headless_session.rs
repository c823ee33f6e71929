//! # Headless Session
//!
//! Drives an editor without a window: builds a small scene, flies the
//! camera around it, saves it and loads it back into a fresh project.
//!
//! Run with `RUST_LOG=debug` to see the scene dump after loading.

use anyhow::Context;
use voxel_playground::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut editor = voxel_playground::default();

    // A table: a flat cube on four thin cylinders
    let top = editor.create_object(PrimitiveKind::Cube);
    editor.set_translate(Some(top), Vector3::new(0.0, 1.0, 0.0))?;
    editor.set_scale(Some(top), Vector3::new(2.0, 0.1, 1.0))?;
    editor.set_color(Some(top), Vector3::new(0.6, 0.4, 0.2))?;

    for (x, z) in [(-0.9, -0.4), (0.9, -0.4), (-0.9, 0.4), (0.9, 0.4)] {
        let leg = editor.create_object(PrimitiveKind::Cylinder);
        editor.set_translate(Some(leg), Vector3::new(x, 0.5, z))?;
        // Cylinders stand along Z; tip them up
        editor.set_rotate(Some(leg), Vector3::new(90.0, 0.0, 0.0))?;
        editor.set_scale(Some(leg), Vector3::new(0.1, 0.1, 1.0))?;
    }

    let lamp = editor.create_object(PrimitiveKind::Cone);
    editor.set_translate(Some(lamp), Vector3::new(0.5, 1.4, 0.0))?;
    editor.set_rotate(Some(lamp), Vector3::new(-90.0, 0.0, 0.0))?;
    editor.set_color(Some(lamp), Vector3::new(1.0, 0.9, 0.2))?;

    // Dolly in, look a little left, then rise
    editor.drag(0.0, -0.02, DragButtons::BOTH);
    editor.drag(0.1, 0.0, DragButtons::SECONDARY);
    editor.drag(0.0, -0.01, DragButtons::PRIMARY);

    for event in editor.drain_events() {
        log::debug!("{:?}", event);
    }

    if editor.take_redraw_request() {
        let frame = editor.render_frame();
        println!(
            "{} objects, {} triangles, camera at {:?}",
            frame.items.len(),
            frame.triangle_count(),
            editor.camera().position
        );
    }

    let path = std::env::temp_dir().join(format!("table.{}", FILE_EXTENSION));
    editor
        .save(&path)
        .with_context(|| format!("saving {}", path.display()))?;

    editor.new_project();
    let report = editor
        .load(&path)
        .with_context(|| format!("loading {}", path.display()))?;
    println!(
        "Reloaded {} objects from {} ({})",
        editor.scene().len(),
        path.display(),
        if report.is_clean() { "clean" } else { "repaired" }
    );

    for (index, label) in editor.scene().object_labels().iter().enumerate() {
        let object = editor
            .query_object(Some(index))?
            .context("object vanished after load")?;
        println!("{:>2} {:<9} at {:?}", index, label, object.translate);
    }

    Ok(())
}
