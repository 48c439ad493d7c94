//! Shape tree flattening.
//!
//! Walks one diagram's shape tree with an explicit work-list and emits one
//! [`Element`] per non-root shape. Shapes are moved out of the tree as they
//! are visited, so each subtree is owned by exactly one work item.

use std::collections::HashMap;

use log::{debug, trace};

use bpmetrics_core::{
    element::Element,
    metadata::DiagramInfo,
    relation::ElementRelation,
    shape::Shape,
};

use crate::{
    ParseOptions,
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    path::ShapePath,
    text::{clean_label, normalize_glossary_link},
};

/// A shape waiting to be visited, tagged with where it sits.
struct WorkItem {
    shape: Shape,
    path: ShapePath,
    parent: Option<String>,
}

/// Flatten `root` into the relation of one diagram.
///
/// Every problem of the tree is collected before failing, so a single
/// [`ParseError`] lists all missing and duplicate resource ids.
pub(crate) fn flatten(
    mut root: Shape,
    info: DiagramInfo,
    options: &ParseOptions,
) -> Result<ElementRelation, ParseError> {
    let model_id = info.model_id().clone();
    let diagram_name = info.name().map(str::to_string);
    let mut collector = DiagnosticCollector::new();

    let root_id = root.resource_id().map(str::to_string);
    if root_id.is_none() {
        collector.emit(missing_resource_id(ShapePath::root()));
    }

    let mut work = Vec::new();
    push_children(&mut work, &mut root, &ShapePath::root(), root_id.as_deref());

    let mut elements = Vec::new();
    let mut first_seen: HashMap<String, ShapePath> = HashMap::new();

    while let Some(WorkItem {
        mut shape,
        path,
        parent,
    }) = work.pop()
    {
        let resource_id = shape.resource_id().map(str::to_string);
        push_children(&mut work, &mut shape, &path, resource_id.as_deref());

        let Some(resource_id) = resource_id else {
            collector.emit(missing_resource_id(path));
            continue;
        };

        if let Some(original) = first_seen.get(&resource_id) {
            collector.emit(
                Diagnostic::error(format!(
                    "resource id `{resource_id}` is used by more than one shape"
                ))
                .with_code(ErrorCode::E101)
                .with_label(path, "duplicate definition")
                .with_secondary_label(original.clone(), "first defined here"),
            );
            continue;
        }
        first_seen.insert(resource_id.clone(), path.clone());

        trace!(
            model_id = model_id.as_str(),
            element_id = resource_id.as_str(),
            depth = path.depth();
            "Visiting shape"
        );

        let outgoing = options
            .include_outgoing()
            .then(|| outgoing_targets(&shape, &path, &mut collector));
        let parent = if options.include_parent() { parent } else { None };

        elements.push(
            Element::new(model_id.clone(), resource_id)
                .with_category(shape.category().map(str::to_string))
                .with_label(shape.display_name().map(|name| clean_label(&name)))
                .with_glossary_link_id(normalize_glossary_link(shape.glossary_name()))
                .with_parent(parent)
                .with_outgoing(outgoing)
                .with_name(diagram_name.clone()),
        );
    }

    collector.finish(&model_id)?;

    debug!(
        model_id = model_id.as_str(),
        elements = elements.len();
        "Flattened diagram"
    );

    ElementRelation::for_diagram(info, options.columns(), elements)
        .map_err(|err| ParseError::new(Some(model_id), vec![Diagnostic::error(err.to_string())]))
}

/// Queue the children of `shape`, preserving document order on pop.
fn push_children(work: &mut Vec<WorkItem>, shape: &mut Shape, path: &ShapePath, parent: Option<&str>) {
    let children = shape.take_child_shapes();
    work.reserve(children.len());
    for (index, child) in children.into_iter().enumerate().rev() {
        work.push(WorkItem {
            shape: child,
            path: path.child(index),
            parent: parent.map(str::to_string),
        });
    }
}

fn outgoing_targets(
    shape: &Shape,
    path: &ShapePath,
    collector: &mut DiagnosticCollector,
) -> Vec<String> {
    let mut targets = Vec::with_capacity(shape.outgoing().len());
    for (index, reference) in shape.outgoing().iter().enumerate() {
        match reference.resource_id() {
            Some(target) => targets.push(target.to_string()),
            None => collector.emit(
                Diagnostic::warning("outgoing reference without target")
                    .with_code(ErrorCode::E102)
                    .with_label(path.clone(), format!("entry {index} of `outgoing`"))
                    .with_help("the reference is ignored"),
            ),
        }
    }
    targets
}

fn missing_resource_id(path: ShapePath) -> Diagnostic {
    Diagnostic::error("shape has no resource id")
        .with_code(ErrorCode::E100)
        .with_label(path, "missing `resourceId`")
        .with_help("every shape of the tree must carry a `resourceId`")
}

#[cfg(test)]
mod tests {
    use bpmetrics_core::element::ModelId;

    use super::*;

    fn info() -> DiagramInfo {
        DiagramInfo::new(ModelId::new("m1")).with_name(Some("Order handling".to_string()))
    }

    fn simple_tree() -> Shape {
        Shape::new("canvas")
            .with_child(
                Shape::new("start")
                    .with_stencil("StartNoneEvent")
                    .with_outgoing("f1"),
            )
            .with_child(
                Shape::new("lane")
                    .with_stencil("Lane")
                    .with_name("Sales")
                    .with_child(
                        Shape::new("task")
                            .with_stencil("Task")
                            .with_name("Check\norder")
                            .with_glossary_link("/glossary/g1"),
                    ),
            )
            .with_child(Shape::new("f1").with_stencil("SequenceFlow").with_outgoing("task"))
    }

    #[test]
    fn test_flatten_skips_root() {
        let relation = flatten(simple_tree(), info(), &ParseOptions::default()).unwrap();

        assert_eq!(relation.len(), 4);
        assert!(relation.get(&ModelId::new("m1"), "canvas").is_none());
    }

    #[test]
    fn test_flatten_document_order() {
        let relation = flatten(simple_tree(), info(), &ParseOptions::default()).unwrap();
        let ids: Vec<&str> = relation.elements().iter().map(Element::element_id).collect();

        assert_eq!(ids, vec!["start", "lane", "task", "f1"]);
    }

    #[test]
    fn test_flatten_fills_columns() {
        let relation = flatten(simple_tree(), info(), &ParseOptions::default()).unwrap();
        let model = ModelId::new("m1");

        let task = relation.get(&model, "task").unwrap();
        assert_eq!(task.category(), Some("Task"));
        assert_eq!(task.label(), Some("Check order"));
        assert_eq!(task.glossary_link_id(), Some("g1"));
        assert_eq!(task.parent(), Some("lane"));
        assert_eq!(task.outgoing(), Some(&[][..]));
        assert_eq!(task.name(), Some("Order handling"));

        let start = relation.get(&model, "start").unwrap();
        assert_eq!(start.parent(), Some("canvas"));
        assert_eq!(start.outgoing(), Some(&["f1".to_string()][..]));
        assert_eq!(start.label(), None);
    }

    #[test]
    fn test_flatten_without_optional_columns() {
        let options = ParseOptions::default()
            .with_include_parent(false)
            .with_include_outgoing(false);
        let relation = flatten(simple_tree(), info(), &options).unwrap();

        assert!(!relation.columns().parent);
        assert!(!relation.columns().outgoing);
        assert!(relation.elements().iter().all(|e| e.parent().is_none()));
        assert!(relation.elements().iter().all(|e| e.outgoing().is_none()));
    }

    #[test]
    fn test_flatten_stencil_without_id() {
        let root = Shape::new("canvas").with_child(Shape::new("x").with_empty_stencil());
        let relation = flatten(root, info(), &ParseOptions::default()).unwrap();

        assert_eq!(relation.elements()[0].category(), None);
    }

    #[test]
    fn test_flatten_reports_every_missing_id() {
        let root = Shape::new("canvas")
            .with_child(Shape::default().with_stencil("Task"))
            .with_child(Shape::new("lane").with_child(Shape::default()));

        let err = flatten(root, info(), &ParseOptions::default()).unwrap_err();

        assert_eq!(err.model_id(), Some(&ModelId::new("m1")));
        assert_eq!(err.diagnostics().len(), 2);
        assert!(
            err.diagnostics()
                .iter()
                .all(|d| d.code() == Some(ErrorCode::E100))
        );
        let paths: Vec<String> = err
            .diagnostics()
            .iter()
            .map(|d| d.labels()[0].path().to_string())
            .collect();
        assert_eq!(paths, vec!["/childShapes/0", "/childShapes/1/childShapes/0"]);
    }

    #[test]
    fn test_flatten_root_without_id() {
        let root = Shape::default().with_child(Shape::new("t"));

        let err = flatten(root, info(), &ParseOptions::default()).unwrap_err();

        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E100));
        assert!(err.diagnostics()[0].labels()[0].path().is_root());
    }

    #[test]
    fn test_flatten_duplicate_resource_id() {
        let root = Shape::new("canvas")
            .with_child(Shape::new("dup"))
            .with_child(Shape::new("lane").with_child(Shape::new("dup")));

        let err = flatten(root, info(), &ParseOptions::default()).unwrap_err();
        let diag = &err.diagnostics()[0];

        assert_eq!(diag.code(), Some(ErrorCode::E101));
        assert_eq!(diag.labels()[0].path().to_string(), "/childShapes/1/childShapes/0");
        assert_eq!(diag.labels()[1].path().to_string(), "/childShapes/0");
    }

    #[test]
    fn test_flatten_skips_reference_without_target() {
        let json = r#"{
            "resourceId": "canvas",
            "childShapes": [
                {"resourceId": "a", "outgoing": [{}, {"resourceId": "b"}]},
                {"resourceId": "b"}
            ]
        }"#;
        let root = Shape::from_json(json).unwrap();

        let relation = flatten(root, info(), &ParseOptions::default()).unwrap();
        let a = relation.get(&ModelId::new("m1"), "a").unwrap();

        assert_eq!(a.outgoing(), Some(&["b".to_string()][..]));
    }
}
