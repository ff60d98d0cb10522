//! Resource Builder
//!
//! Compiles the application model and the loaded templates into the
//! canonical bundle: one application configuration plus one component per
//! service, in declaration order. Building is pure compilation: progress
//! goes to the reporter, but neither the cluster nor the filesystem is
//! touched, and the same inputs always produce the same bundle. Any
//! unresolvable template or failed expansion aborts the whole build; no
//! partial bundle is returned.

use serde_yaml::{Mapping, Value};

use crate::appfile::{AppFile, Service};
use crate::error::{Result, template_not_found};
use crate::resource::{ApplicationConfiguration, Bundle, Component, ComponentRef, ComponentTrait};
use crate::template::TemplateStore;
use crate::ui::Reporter;

/// Compile an application into a resource bundle scoped to `namespace`
pub fn build_bundle(
    app: &AppFile,
    templates: &TemplateStore,
    namespace: &str,
    reporter: &mut Reporter,
) -> Result<Bundle> {
    let mut components = Vec::with_capacity(app.services.len());
    let mut references = Vec::with_capacity(app.services.len());

    for service in &app.services {
        reporter.info(format!(
            "Rendering service ({}) with type ({}) ...",
            service.name, service.workload_type
        ));

        let template = templates
            .get(&service.workload_type)
            .ok_or_else(|| template_not_found(&service.name, &service.workload_type))?;
        let workload = template.render(&service.name, &service.settings)?;

        components.push(Component::new(namespace, &service.name, workload));
        references.push(component_ref(service));
    }

    let bundle = Bundle {
        configuration: ApplicationConfiguration::new(namespace, &app.name, references),
        components,
    };
    bundle.validate()?;
    Ok(bundle)
}

fn component_ref(service: &Service) -> ComponentRef {
    let traits = service
        .traits
        .iter()
        .map(|t| {
            let mut spec = Mapping::new();
            spec.insert(Value::from("name"), Value::from(t.name.as_str()));
            spec.insert(Value::from("properties"), t.properties.clone());
            ComponentTrait {
                spec: Value::Mapping(spec),
            }
        })
        .collect();

    ComponentRef {
        component_name: service.name.clone(),
        traits,
    }
}
