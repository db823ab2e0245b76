//! Typedef cycle detection.
//!
//! A typedef is a transparent alias, so a loop of typedefs never reaches a
//! concrete type. Collection parameters add no indirection either:
//! `typedef list<A> A` is as broken as `typedef A A`. Only struct fields may
//! be recursive, and they are not typedef edges.

use std::collections::HashMap;

use super::dependencies::{cycle_path, is_cycle, strongly_connected};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::element::UserElement;
use crate::model::TypedefType;
use crate::types::{TypeGraph, TypeId, TypeShape};

/// Report one `CyclicTypedef` per cycle, naming every typedef on it.
pub fn check_typedef_cycles(
    graph: &TypeGraph,
    typedefs: &[TypedefType],
    diagnostics: &mut Diagnostics,
) {
    let index: HashMap<TypeId, usize> = typedefs
        .iter()
        .enumerate()
        .map(|(i, typedef)| (typedef.type_id(), i))
        .collect();

    let edges: Vec<Vec<usize>> = typedefs
        .iter()
        .map(|typedef| {
            let mut targets = Vec::new();
            collect_aliased(graph, typedef.old_type(), &index, &mut targets);
            targets
        })
        .collect();

    let mut cycles = 0;
    for scc in strongly_connected(&edges) {
        if !is_cycle(&scc, &edges) {
            continue;
        }
        cycles += 1;

        let path = cycle_path(&scc, &edges);
        let names: Vec<String> = path
            .iter()
            .map(|&i| format!("`{}`", typedefs[i].name()))
            .collect();
        let head = &typedefs[scc[0]];

        let mut builder = diagnostics
            .report(DiagnosticKind::CyclicTypedef, head.location())
            .message(names.join(" -> "));
        for &member in &scc[1..] {
            let typedef = &typedefs[member];
            builder = builder.related_to(
                format!("`{}` is declared here", typedef.name()),
                typedef.location(),
            );
        }
        builder.emit();
    }

    log::debug!("checked {} typedefs, {} cycles", typedefs.len(), cycles);
}

/// Typedefs reachable from `id` without passing through a non-typedef
/// user type.
fn collect_aliased(
    graph: &TypeGraph,
    id: TypeId,
    index: &HashMap<TypeId, usize>,
    out: &mut Vec<usize>,
) {
    match *graph.shape(id) {
        TypeShape::List(element) | TypeShape::Set(element) => {
            collect_aliased(graph, element, index, out)
        }
        TypeShape::Map { key, value } => {
            collect_aliased(graph, key, index, out);
            collect_aliased(graph, value, index, out);
        }
        TypeShape::User(_) => {
            if let Some(&target) = index.get(&id)
                && !out.contains(&target)
            {
                out.push(target);
            }
        }
        TypeShape::Builtin(_) | TypeShape::Invalid => {}
    }
}
