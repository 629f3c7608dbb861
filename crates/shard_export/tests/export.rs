use shard_core::guider::CIRCLE_1;
use shard_core::ids::{EMPTY_BULLET, EMPTY_TARGET_GROUP};
use shard_core::{BulletPool, CompilerContext, RadialParams};
use shard_export::{build_document, export, ExportError, ExportSettings};
use std::path::PathBuf;

fn output(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("shard_export_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

fn stage() -> CompilerContext {
    let mut ctx = CompilerContext::new();
    let tmpl = ctx.component("Bullet", 36);
    ctx.edit(tmpl)
        .unwrap()
        .assert_spawn_order(true)
        .unwrap()
        .toggle(0.0, EMPTY_BULLET, true)
        .unwrap()
        .toggle(0.0, EMPTY_TARGET_GROUP, true)
        .unwrap();
    let enemy = ctx.component("Enemy", 40);
    let mut pool = BulletPool::new(501, 1000).unwrap();
    ctx.edit(enemy)
        .unwrap()
        .instant()
        .radial(0.0, tmpl, &CIRCLE_1, &mut pool, RadialParams::bullets(24))
        .unwrap();
    let spell = ctx.spell("Opening", 60);
    ctx.add_to_spell(spell, enemy).unwrap();
    ctx
}

#[test]
fn export_writes_string_keyed_document() {
    let ctx = stage();
    let settings = ExportSettings {
        output: output("stage.json"),
        ..ExportSettings::default()
    };
    let stats = export(&ctx, &settings).unwrap();

    let text = std::fs::read_to_string(&settings.output).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    let triggers = json["triggers"].as_array().unwrap();
    assert_eq!(triggers.len(), stats.total_triggers);
    assert!(triggers.iter().all(|t| t.get("1").is_some() && t.get("3").is_some()));
    assert_eq!(stats.spells.get("Opening"), 2);
    assert!(!settings.output.with_file_name("stage.json.tmp").exists());
}

#[test]
fn same_seed_same_document() {
    let ctx = stage();
    let settings = ExportSettings::default();
    assert_eq!(
        build_document(&ctx, &settings).unwrap(),
        build_document(&ctx, &settings).unwrap()
    );
}

#[test]
fn hazard_leaves_no_artifact() {
    let mut ctx = CompilerContext::new();
    let inner = ctx.component("Inner", 40);
    ctx.edit(inner).unwrap().spawn(0.0, 41, false).unwrap();
    let outer = ctx.component("Outer", 36);
    ctx.edit(outer)
        .unwrap()
        .assert_spawn_order(true)
        .unwrap()
        .spawn(1.0, 40, false)
        .unwrap()
        .spawn(1.0, 40, false)
        .unwrap();

    let settings = ExportSettings {
        output: output("hazard.json"),
        ..ExportSettings::default()
    };
    let err = export(&ctx, &settings).unwrap_err();
    assert!(matches!(err, ExportError::Hazard(_)));
    assert!(!settings.output.exists());
}
