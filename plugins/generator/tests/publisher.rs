use async_trait::async_trait;
use notes_pages::{DataApi, DataQuery, HostError, LocalDirs, PluginDirs, StaticSettings};
use notes_pages_generator::{
    GeneratorError, PublisherContext, all_resources, copy_assets, copy_markdown_plugin_assets,
    markdown_settings, output_dir, output_resources, site, theme_data,
};
use notes_pages_theme_loader::{Theme, ThemeError, ThemeFetcher};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Host data API serving two pages of resources from memory
struct FakeData {
    files: HashMap<String, Vec<u8>>,
}

#[async_trait]
impl DataApi for FakeData {
    async fn get(&self, path: &[&str], query: &DataQuery) -> Result<Value, HostError> {
        assert_eq!(path, ["resources"]);
        assert_eq!(
            query.fields.as_deref(),
            Some("id,mime,file_extension,encryption_applied,encryption_blob_encrypted")
        );

        Ok(match query.page {
            Some(1) => json!({
                "items": [
                    { "id": "img1", "mime": "image/png", "file_extension": "png",
                      "encryption_applied": 0, "encryption_blob_encrypted": 0 },
                    { "id": "doc1", "mime": "application/pdf", "file_extension": "pdf",
                      "encryption_applied": 0, "encryption_blob_encrypted": 0 }
                ],
                "has_more": true
            }),
            _ => json!({
                "items": [
                    { "id": "lost", "mime": "image/gif", "file_extension": "gif" },
                    { "id": "bare", "mime": "application/octet-stream", "file_extension": "" }
                ],
                "has_more": false
            }),
        })
    }

    async fn get_file(&self, resource_id: &str) -> Result<Vec<u8>, HostError> {
        self.files
            .get(resource_id)
            .cloned()
            .ok_or_else(|| HostError::Request(format!("no file for {}", resource_id)))
    }
}

struct FakeThemes {
    themes: Vec<Theme>,
}

#[async_trait]
impl ThemeFetcher for FakeThemes {
    async fn fetch(&self, theme_name: &str) -> Result<Option<Theme>, ThemeError> {
        Ok(self.themes.iter().find(|t| t.name == theme_name).cloned())
    }

    async fn fetch_all(&self) -> Result<Vec<Theme>, ThemeError> {
        Ok(self.themes.clone())
    }
}

struct Fixture {
    _root: tempfile::TempDir,
    data_dir: PathBuf,
    install_dir: PathBuf,
    ctx: PublisherContext,
}

fn fixture() -> Fixture {
    let root = tempfile::tempdir().unwrap();
    let data_dir = root.path().join("data");
    let install_dir = root.path().join("install");
    std::fs::create_dir_all(&data_dir).unwrap();

    let dirs: Arc<dyn PluginDirs> = Arc::new(LocalDirs::new(&data_dir, &install_dir));
    let data = Arc::new(FakeData {
        files: HashMap::from([
            ("img1".to_string(), b"png-bytes".to_vec()),
            ("lost".to_string(), b"gif-bytes".to_vec()),
            ("bare".to_string(), b"raw-bytes".to_vec()),
        ]),
    });
    let settings = Arc::new(StaticSettings::new().with("markdown.plugin.toc", true));
    let theme: Theme = serde_json::from_value(json!({
        "name": "default",
        "pages": {
            "home": [
                { "name": "subtitle", "defaultValue": "Welcome" },
                { "name": "footer" }
            ],
            "archive": [{ "name": "perPage", "defaultValue": 20 }]
        }
    }))
    .unwrap();
    let themes = Arc::new(FakeThemes {
        themes: vec![theme],
    });

    let ctx = PublisherContext::new(dirs, data, settings, themes);
    Fixture {
        _root: root,
        data_dir,
        install_dir,
        ctx,
    }
}

fn write(path: &Path, contents: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

#[tokio::test]
async fn site_requires_stored_site_info() {
    let f = fixture();

    let err = site(&f.ctx).await.unwrap_err();
    assert!(matches!(err, GeneratorError::MissingSite));
}

#[tokio::test]
async fn site_carries_only_published_articles() {
    let f = fixture();
    f.ctx
        .store
        .save(&["site"], &json!({ "title": "My notes" }))
        .await
        .unwrap();
    f.ctx
        .store
        .save(
            &["articles"],
            &json!([
                { "title": "draft", "published": false },
                { "title": "live", "published": true },
                { "title": "unflagged" }
            ]),
        )
        .await
        .unwrap();

    let site = site(&f.ctx).await.unwrap();

    assert_eq!(site["title"], "My notes");
    assert_eq!(site["articles"], json!([{ "title": "live", "published": true }]));
    assert!(site["generatedAt"].as_u64().unwrap() > 0);

    // the stored site is untouched
    assert_eq!(
        f.ctx.store.fetch(&["site"]).await.unwrap(),
        Some(json!({ "title": "My notes" }))
    );
}

#[tokio::test]
async fn theme_data_merges_saved_values_over_defaults() {
    let f = fixture();
    f.ctx
        .store
        .save(
            &["pagesFieldVars", "default"],
            &json!({ "home": { "subtitle": "Hello there" } }),
        )
        .await
        .unwrap();

    let data = theme_data(&f.ctx, "default").await.unwrap();

    assert_eq!(
        Value::Object(data.field_values),
        json!({
            "home": { "subtitle": "Hello there", "footer": "" },
            "archive": { "perPage": 20 }
        })
    );
    assert_eq!(data.pages["home"].len(), 2);
}

#[tokio::test]
async fn theme_data_for_unknown_theme_fails() {
    let f = fixture();

    let err = theme_data(&f.ctx, "missing").await.unwrap_err();
    assert!(matches!(err, GeneratorError::ThemeNotFound(name) if name == "missing"));
}

#[tokio::test]
async fn markdown_settings_come_from_context_settings() {
    let f = fixture();

    let enabled = markdown_settings(f.ctx.settings.as_ref()).await.unwrap();
    assert_eq!(Value::Object(enabled), json!({ "toc": {} }));
}

#[tokio::test]
async fn resources_are_collected_across_pages() {
    let f = fixture();

    let resources = all_resources(&f.ctx).await.unwrap();

    assert_eq!(resources.len(), 4);
    let img = &resources["img1"];
    assert_eq!(img.extension, "png");
    assert_eq!(
        serde_json::to_value(img).unwrap(),
        json!({
            "extension": "png",
            "item": {
                "id": "img1",
                "mime": "image/png",
                "encryption_applied": 0,
                "encryption_blob_encrypted": 0
            },
            "localState": { "fetch_status": 2 }
        })
    );
}

#[tokio::test]
async fn resources_are_written_and_failures_skipped() {
    let f = fixture();
    let resources = all_resources(&f.ctx).await.unwrap();

    let written = output_resources(&f.ctx, &["img1", "doc1", "unknown", "lost"], &resources)
        .await
        .unwrap();

    assert_eq!(written, 2);
    let out = output_dir(&f.ctx).await.unwrap().join("_resources");
    assert_eq!(out, f.data_dir.join("output/_resources"));
    assert_eq!(std::fs::read(out.join("img1.png")).unwrap(), b"png-bytes");
    assert_eq!(std::fs::read(out.join("lost.gif")).unwrap(), b"gif-bytes");
    assert!(!out.join("doc1.pdf").exists());
}

#[tokio::test]
async fn resource_without_extension_keeps_the_dot() {
    let f = fixture();
    let resources = all_resources(&f.ctx).await.unwrap();

    let written = output_resources(&f.ctx, &["bare"], &resources).await.unwrap();

    assert_eq!(written, 1);
    let out = f.data_dir.join("output/_resources");
    assert_eq!(std::fs::read(out.join("bare.")).unwrap(), b"raw-bytes");
}

#[tokio::test]
async fn theme_assets_are_copied() {
    let f = fixture();
    let theme_assets = f.data_dir.join("themes/paper/_assets");
    write(&theme_assets.join("style.css"), "body {}");
    write(&theme_assets.join("img/logo.svg"), "<svg/>");

    copy_assets(&f.ctx, "paper").await.unwrap();

    let out = f.data_dir.join("output/_assets");
    assert_eq!(std::fs::read_to_string(out.join("style.css")).unwrap(), "body {}");
    assert_eq!(std::fs::read_to_string(out.join("img/logo.svg")).unwrap(), "<svg/>");
}

#[tokio::test]
async fn default_theme_assets_come_from_installation() {
    let f = fixture();
    write(
        &f.install_dir.join("assets/defaultTheme/_assets/main.js"),
        "console.log(1)",
    );

    copy_assets(&f.ctx, "default").await.unwrap();

    assert!(f.data_dir.join("output/_assets/main.js").exists());
}

#[tokio::test]
async fn missing_theme_assets_fail() {
    let f = fixture();

    let err = copy_assets(&f.ctx, "paper").await.unwrap_err();
    assert!(matches!(err, GeneratorError::Copy { .. }));
}

#[tokio::test]
async fn markdown_plugin_assets_are_copied_by_name() {
    let f = fixture();
    let bundled = f.install_dir.join("assets/markdownPluginAssets");
    write(&bundled.join("katex/katex.css"), "katex");
    write(&bundled.join("highlight.css"), "hl");

    copy_markdown_plugin_assets(&f.ctx, &["katex", "highlight.css"])
        .await
        .unwrap();

    let out = f.data_dir.join("output/_markdownPluginAssets");
    assert_eq!(std::fs::read_to_string(out.join("katex/katex.css")).unwrap(), "katex");
    assert_eq!(std::fs::read_to_string(out.join("highlight.css")).unwrap(), "hl");
}

#[tokio::test]
async fn markdown_plugin_asset_names_cannot_leave_the_bundle() {
    let f = fixture();
    let bundled = f.install_dir.join("assets/markdownPluginAssets");
    write(&bundled.join("katex/katex.css"), "katex");
    write(&f.install_dir.join("assets/secret.txt"), "secret");

    for name in ["..", "../secret.txt", "katex/katex.css", ""] {
        let err = copy_markdown_plugin_assets(&f.ctx, &["katex", name])
            .await
            .unwrap_err();
        assert!(
            matches!(&err, GeneratorError::InvalidAssetName(rejected) if rejected == name),
            "unexpected error for {:?}: {}",
            name,
            err
        );
    }

    assert!(!f.data_dir.join("output/_markdownPluginAssets").exists());
}
