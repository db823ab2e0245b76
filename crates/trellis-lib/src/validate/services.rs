//! Service inheritance rules.

use std::collections::{HashMap, HashSet};

use crate::analyze::dependencies::{cycle_path, is_cycle, strongly_connected};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::element::UserElement;
use crate::model::{ServiceMethod, ServiceType};
use crate::types::{TypeGraph, TypeId};

/// `extends` targets, inheritance cycles, and method name clashes.
pub fn validate_services(services: &[ServiceType], graph: &TypeGraph, diagnostics: &mut Diagnostics) {
    let index: HashMap<TypeId, usize> = services
        .iter()
        .enumerate()
        .map(|(i, service)| (service.type_id(), i))
        .collect();

    for service in services {
        if let Some(base) = service.extends()
            && !graph.is_service(base)
            && !graph.is_invalid(base)
        {
            diagnostics
                .report(DiagnosticKind::InvalidServiceExtends, service.location())
                .message(graph.display(base))
                .emit();
        }
    }

    // Edge from each service to its base, seen through typedefs
    let edges: Vec<Vec<usize>> = services
        .iter()
        .map(|service| {
            service
                .extends()
                .and_then(|base| graph.true_type(base))
                .and_then(|base| index.get(&base).copied())
                .into_iter()
                .collect()
        })
        .collect();

    for scc in strongly_connected(&edges) {
        if !is_cycle(&scc, &edges) {
            continue;
        }
        let names: Vec<String> = cycle_path(&scc, &edges)
            .iter()
            .map(|&i| format!("`{}`", services[i].name()))
            .collect();
        diagnostics
            .report(DiagnosticKind::CyclicServiceInheritance, services[scc[0]].location())
            .message(names.join(" -> "))
            .emit();
    }

    for (i, service) in services.iter().enumerate() {
        validate_method_names(i, services, &edges, diagnostics);
        log::trace!("validated service `{}`", service.name());
    }
}

/// Method names are unique within a service and across its ancestors.
fn validate_method_names(
    service: usize,
    services: &[ServiceType],
    edges: &[Vec<usize>],
    diagnostics: &mut Diagnostics,
) {
    let mut inherited: HashMap<&str, (&ServiceType, &ServiceMethod)> = HashMap::new();
    let mut visited = HashSet::from([service]);
    let mut current = service;
    while let Some(&base) = edges[current].first() {
        if !visited.insert(base) {
            break;
        }
        for method in services[base].methods() {
            inherited
                .entry(method.name())
                .or_insert((&services[base], method));
        }
        current = base;
    }

    let mut declared: HashMap<&str, &ServiceMethod> = HashMap::new();
    for method in services[service].methods() {
        if let Some(first) = declared.get(method.name()) {
            diagnostics
                .report(DiagnosticKind::DuplicateMethod, method.location())
                .message(method.name())
                .related_to("first declared here", first.location())
                .emit();
            continue;
        }
        declared.insert(method.name(), method);

        if let Some((base, inherited_method)) = inherited.get(method.name()) {
            diagnostics
                .report(DiagnosticKind::DuplicateMethod, method.location())
                .message(method.name())
                .related_to(
                    format!("inherited from `{}`", base.name()),
                    inherited_method.location(),
                )
                .emit();
        }
    }
}
