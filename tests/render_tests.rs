use nbforge::render::{render, CollectionRule, GroupLayout};
use nbforge::{analyze, Cell, Parameter, ParameterKind};
use pretty_assertions::assert_eq;

#[test]
fn plan_groups_follow_kind_layout_rules() {
    let cells = vec![Cell::code(concat!(
        "prompt = 'a'\n",
        "negative_prompt = ''\n",
        "width = 512\n",
        "height = 512\n",
        "seed = 1\n",
    ))];
    let analysis = analyze(&cells, "t.ipynb");
    let plan = render(&analysis);

    // text fields full-width first, then sliders two-per-row, then numbers
    assert_eq!(plan.groups[0].layout, GroupLayout::FullWidth);
    assert_eq!(
        plan.groups[0]
            .fields
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>(),
        ["prompt", "negative_prompt"]
    );

    let sliders = plan
        .groups
        .iter()
        .find(|g| g.layout == GroupLayout::TwoColumn)
        .unwrap();
    assert!(sliders.fields.iter().all(|f| f.kind == ParameterKind::Range));

    let numbers = plan
        .groups
        .iter()
        .find(|g| g.layout == GroupLayout::ThreeColumn)
        .unwrap();
    assert_eq!(numbers.fields[0].name, "seed");
}

#[test]
fn collection_mapping_matches_parameter_kinds() {
    let cells = vec![Cell::code(
        "prompt = 'a'\nwidth = 512\ninput_image = load()\ngr.Checkbox(label=\"Tile\")",
    )];
    let analysis = analyze(&cells, "t.ipynb");
    let plan = render(&analysis);

    let rule_for = |name: &str| {
        plan.collection
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.rule)
            .unwrap()
    };

    assert_eq!(rule_for("prompt"), CollectionRule::Text);
    assert_eq!(rule_for("width"), CollectionRule::Float);
    assert_eq!(rule_for("input_image"), CollectionRule::ImageBase64);
    assert_eq!(rule_for("tile"), CollectionRule::Checked);
}

#[test]
fn boolean_without_default_collects_false_when_control_absent() {
    let param = Parameter::new("tile", ParameterKind::Boolean);
    assert!(param.default.is_none());

    let rule = CollectionRule::for_kind(param.kind);
    assert_eq!(rule, CollectionRule::Checked);
    // the generated extraction must fall back to false, not undefined
    assert!(rule.js_line("tile").ends_with("?.checked || false;"));
}

#[test]
fn schema_comment_documents_the_wire_contract() {
    let analysis = analyze(&[Cell::code("width = 1024\nnegative_prompt = ''")], "t.ipynb");
    let plan = render(&analysis);

    assert!(plan.schema_comment.contains("width: range (default: 1024)"));
    assert!(plan
        .schema_comment
        .contains("negative_prompt: multiline text (default: \"\") [optional]"));
    assert!(plan.schema_comment.contains("response: {success: bool"));
}

#[test]
fn html_page_embeds_collection_rules() {
    let cells = vec![Cell::code("prompt = 'x'\nwidth = 512")];
    let analysis = analyze(&cells, "t.ipynb");
    let page = nbforge::render::generate_page(&analysis);

    assert!(page.contains(
        "params['width'] = parseFloat(document.getElementById('width')?.value || 0);"
    ));
    assert!(page.contains("params['prompt'] = (document.getElementById('prompt')?.value || '').trim();"));
}
