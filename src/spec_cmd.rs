use std::fs;

use camino::Utf8PathBuf;
use color_eyre::{eyre::Context, Result};
use log::info;

use crate::{flags::FlagSet, utils::write_to_file};

pub const DEFAULT_TEMPLATE: &str = "spec_template";

/// Generates a `<name>.spec` file from the resolved flag values and a
/// template appended verbatim at the end.
pub struct SpecCmd {
    pub summary: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
    pub release: Option<String>,
    pub license: Option<String>,
    pub description: Option<String>,
    pub sourceloc: Option<String>,
    pub group: Option<String>,
    pub package_type: Option<String>,
    pub buildarch: Option<String>,
    pub deps: Option<String>,
    pub template: Utf8PathBuf,
}

// An absent field is still written out, as the literal string "None". The
// resulting spec file may be malformed but generation never fails on a
// missing field.
fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("None")
}

impl SpecCmd {
    pub fn from_flags(flags: &FlagSet) -> Self {
        let get = |name: &str| flags.get_str(name).map(str::to_string);
        Self {
            summary: get("summary"),
            name: get("name"),
            version: get("version"),
            release: get("release"),
            license: get("license"),
            description: get("description"),
            sourceloc: get("sourceloc"),
            group: get("group"),
            package_type: get("type"),
            buildarch: get("buildarch"),
            deps: get("deps"),
            template: Utf8PathBuf::from(flags.get_str("template").unwrap_or(DEFAULT_TEMPLATE)),
        }
    }

    pub fn run(&self) -> Result<()> {
        let template = fs::read_to_string(&self.template)
            .with_context(|| format!("unable to read file {:?}", self.template))?;
        let spec_file = self.spec_path();
        write_to_file(&spec_file, &self.render(&template))?;
        info!("Wrote {spec_file}");

        Ok(())
    }

    pub fn spec_path(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(format!("{}.spec", field(&self.name)))
    }

    /// The fixed-order header block, the `%description` section, then the
    /// template contents verbatim. `Requires` is emitted only when `deps`
    /// was given.
    pub fn render(
        &self,
        template: &str,
    ) -> String {
        let mut spec = String::new();
        spec.push_str(&format!("Summary: {}\n", field(&self.summary)));
        spec.push_str(&format!("Name: {}\n", field(&self.name)));
        spec.push_str(&format!("Version: {}\n", field(&self.version)));
        spec.push_str(&format!("Release: {}\n", field(&self.release)));
        spec.push_str(&format!(
            "Source0: %{{name}}-%{{version}}-%{{release}}-{}.tar.gz \n",
            field(&self.package_type)
        ));
        spec.push_str(&format!("License: {}\n", field(&self.license)));
        spec.push_str(&format!("Group: {}\n", field(&self.group)));
        if let Some(deps) = &self.deps {
            spec.push_str(&format!("Requires: {deps}\n"));
        }
        spec.push_str(&format!("BuildArch: {}\n", field(&self.buildarch)));
        spec.push_str("BuildRoot: %_topdir/BUILD/%{name}-root\n\n");
        spec.push_str(&format!("%description\n{}\n\n", field(&self.description)));
        spec.push_str(template);
        spec.push('\n');
        spec
    }
}
