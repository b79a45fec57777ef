use geo_types::{line_string, point};
use keplergl::config::CUSTOM_STYLE_ID;
use keplergl::{DataInput, MapError, Names, Payload, Visualize, VisualizeOptions};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::io::Write;
use std::path::Path;

fn options_in(dir: &Path) -> VisualizeOptions {
    VisualizeOptions {
        api_key: Some("abc123".to_string()),
        output_map: Some(dir.join("map")),
        ..Default::default()
    }
}

fn embedded_data(html: &str) -> Value {
    let marker = "const KEPLER_DATA = ";
    let start = html.find(marker).expect("data present") + marker.len();
    let end = start + html[start..].find(";\n").expect("statement end");
    serde_json::from_str(&html[start..end]).expect("valid json")
}

#[test]
fn test_with_data_writes_map_at_suffixed_path() {
    let dir = tempfile::tempdir().unwrap();
    let data = Payload::Plain(json!({"type": "Point", "coordinates": [13.4, 52.5]}));

    let vis = Visualize::with_data(data, options_in(dir.path())).unwrap();

    let expected = dir.path().join("map_vis.html");
    assert_eq!(vis.path(), expected);
    assert_eq!(vis.html_path(), Some(expected.as_path()));
    let html = std::fs::read_to_string(&expected).unwrap();
    let data = embedded_data(&html);
    assert_eq!(data["datasets"][0]["id"], "data_0");
    assert_eq!(data["options"], json!({"readOnly": false, "centerMap": true}));
}

#[test]
fn test_geo_and_plain_payloads_are_named_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let payloads = vec![
        Payload::geo(point!(x: 1.0, y: 2.0)),
        Payload::Plain(json!({"type": "FeatureCollection", "features": []})),
        Payload::geo(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)]),
    ];

    let mut vis = Visualize::new(options_in(dir.path())).unwrap();
    vis.add_data(payloads, &Names::from("layer")).unwrap();

    let map = vis.map();
    assert_eq!(map.dataset_names(), vec!["layer_0", "layer_1", "layer_2"]);
    assert_eq!(
        map.dataset("layer_0").unwrap().data,
        json!({"type": "Point", "coordinates": [1.0, 2.0]})
    );
    assert_eq!(
        map.dataset("layer_1").unwrap().data,
        json!({"type": "FeatureCollection", "features": []})
    );
    assert_eq!(map.dataset("layer_2").unwrap().data["type"], "LineString");
}

#[test]
fn test_name_count_mismatch_fails_without_adding_data() {
    let dir = tempfile::tempdir().unwrap();
    let mut vis = Visualize::new(options_in(dir.path())).unwrap();
    let data = DataInput::from(json!([{"a": 1}, {"b": 2}, {"c": 3}]));

    let err = vis
        .add_data(data, &Names::List(vec!["one".to_string(), "two".to_string()]))
        .unwrap_err();

    assert!(matches!(err, MapError::NameCountMismatch { data: 3, names: 2 }));
    assert!(vis.map().dataset_names().is_empty());
}

#[test]
fn test_preset_style_reaches_the_page() {
    let dir = tempfile::tempdir().unwrap();
    let options = VisualizeOptions {
        style: Some("DARK".to_string()),
        ..options_in(dir.path())
    };
    let vis = Visualize::with_data(Payload::Plain(json!("a,b\n1,2")), options).unwrap();

    assert_eq!(vis.map().config()["config"]["mapStyle"]["styleType"], "dark");
    let html = std::fs::read_to_string(vis.path()).unwrap();
    assert_eq!(
        embedded_data(&html)["config"]["config"]["mapStyle"]["styleType"],
        "dark"
    );
}

#[test]
fn test_custom_style_url_is_registered() {
    let dir = tempfile::tempdir().unwrap();
    let url = "https://example.com/style.json";
    let options = VisualizeOptions {
        style: Some(url.to_string()),
        ..options_in(dir.path())
    };
    let vis = Visualize::new(options).unwrap();

    let map_style = &vis.map().config()["config"]["mapStyle"];
    assert_eq!(map_style["styleType"], CUSTOM_STYLE_ID);
    assert_eq!(map_style["mapStyles"][CUSTOM_STYLE_ID]["url"], url);
    assert_eq!(map_style["mapStyles"][CUSTOM_STYLE_ID]["accessToken"], "abc123");
}

#[test]
fn test_explicit_key_beats_fallback_in_template() {
    let dir = tempfile::tempdir().unwrap();
    let mut template = tempfile::NamedTempFile::new().unwrap();
    template
        .write_all(br#"{"config": {"version": "v1", "config": {"mapStyle": {"accessToken": "{MAPBOX_API_KEY}"}}}}"#)
        .unwrap();

    let options = VisualizeOptions {
        fallback_api_key: Some("from-env".to_string()),
        config_file: Some(template.path().to_path_buf()),
        ..options_in(dir.path())
    };
    let vis = Visualize::new(options).unwrap();
    assert_eq!(vis.api_key(), Some("abc123"));
    assert_eq!(vis.map().config()["config"]["mapStyle"]["accessToken"], "abc123");
    assert_eq!(vis.map().mapbox_token(), Some("abc123"));
}

#[test]
fn test_fallback_key_used_without_explicit_key() {
    let dir = tempfile::tempdir().unwrap();
    let options = VisualizeOptions {
        api_key: None,
        fallback_api_key: Some("from-env".to_string()),
        ..options_in(dir.path())
    };
    let vis = Visualize::new(options).unwrap();
    assert_eq!(vis.api_key(), Some("from-env"));
}

#[test]
fn test_missing_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let options = VisualizeOptions {
        config_file: Some(dir.path().join("missing.json")),
        ..options_in(dir.path())
    };
    let err = Visualize::new(options).unwrap_err();
    assert!(matches!(err, MapError::ConfigNotFound(_)));
}

#[test]
fn test_read_only_render_and_rerender() {
    let dir = tempfile::tempdir().unwrap();
    let mut vis = Visualize::new(options_in(dir.path())).unwrap();
    vis.add_data(Payload::Plain(json!({"type": "Point", "coordinates": [0.0, 0.0]})), &Names::Default)
        .unwrap();

    let path = vis.render(false, true, false).unwrap();
    let first = embedded_data(&std::fs::read_to_string(&path).unwrap());
    assert_eq!(first["options"]["readOnly"], true);
    assert_eq!(first["datasets"].as_array().unwrap().len(), 1);

    vis.add_data(Payload::Plain(json!("x\n1")), &Names::from("extra"))
        .unwrap();
    let again = vis.render(false, false, true).unwrap();
    assert_eq!(again, path);
    let second = embedded_data(&std::fs::read_to_string(&path).unwrap());
    let ids: Vec<_> = second["datasets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["data_0", "extra_0"]);
}

#[test]
fn test_default_output_goes_to_temp_dir() {
    let vis = Visualize::with_data(
        Payload::Plain(json!({"type": "Point", "coordinates": [0.0, 0.0]})),
        VisualizeOptions::default(),
    )
    .unwrap();
    assert_eq!(vis.path().file_name().unwrap(), "defaultmap_vis.html");
    assert!(vis.path().is_file());
    std::fs::remove_dir_all(vis.path().parent().unwrap()).unwrap();
}
