//! Rules for the editor/bake module (preprocessor library, editor dependencies).

use acoustics_targets::{HostVersion, TargetEnvironment};

use crate::descriptor::{
    ArtifactKind, CodeOptimization, CompileSettings, DescriptorBuilder, ModuleDescriptor, PchUsage,
};
use crate::error::{Result, RulesError};
use crate::fbx::fbx_subtree;
use crate::options::{PluginLayout, ResolverOptions};
use crate::runtime::RUNTIME_MODULE;

/// Name of the editor/bake module.
pub const EDITOR_MODULE: &str = "ProjectAcousticsBakeUI";

/// Engine release that split navigation out of the engine module.
pub const NAVIGATION_SYSTEM_SINCE: (u64, u64) = (4, 20);

/// Engine release that introduced the mesh description module.
pub const MESH_DESCRIPTION_SINCE: (u64, u64) = (4, 22);

// The preprocessor ships as Win64 release binaries only.
const PREPROCESSOR_ARCH: &str = "Win64";
const PREPROCESSOR_CONFIGURATION: &str = "Release";

const PRIVATE_INCLUDES: [&str; 2] = ["../ThirdParty/Include", "../Source/ProjectAcoustics/Public"];

const PRIVATE_PCH_HEADER: &str = "Public/AcousticsEditorModule.h";

/// Resolve the editor/bake module for `env`.
///
/// Dependency names are gated on the host version; collision support merges
/// the FBX subtree on Win64.
pub fn resolve_editor_module(
    env: &TargetEnvironment,
    layout: &PluginLayout,
    options: &ResolverOptions,
) -> Result<ModuleDescriptor> {
    let version = &env.host_version;
    if !version.is_supported() {
        return Err(RulesError::UnsupportedHostVersion {
            version: version.clone(),
            minimum: HostVersion::MIN_SUPPORTED,
        });
    }

    let mut builder = DescriptorBuilder::new(EDITOR_MODULE);
    builder.compile(CompileSettings {
        pch_usage: PchUsage::Default,
        optimize_code: CodeOptimization::InShippingBuildsOnly,
        private_pch_header: Some(PRIVATE_PCH_HEADER.into()),
    });

    for path in PRIVATE_INCLUDES {
        builder.private_include(path);
    }
    for name in public_dependencies(version) {
        builder.public_dependency(name);
    }
    for name in private_dependencies(version) {
        builder.private_dependency(name);
    }

    let prefix = options.library_prefix.as_str();
    let dll_name = format!("{prefix}Preprocessor.dll");
    let lib_dir = layout
        .third_party_dir
        .join(PREPROCESSOR_ARCH)
        .join(PREPROCESSOR_CONFIGURATION);
    builder
        .artifact(
            ArtifactKind::Preprocessor,
            lib_dir.join(format!("{prefix}Preprocessor.lib")),
        )
        .delay_load_dll(&dll_name)
        .runtime_dependency(lib_dir.join(&dll_name), None);

    if options.collision_support {
        match fbx_subtree(env, layout)? {
            Some(fbx) => {
                builder.merge(fbx);
            }
            None => tracing::debug!(
                platform = %env.platform,
                "collision support requested but the FBX SDK is Win64 only"
            ),
        }
    }

    let descriptor = builder.build();
    tracing::info!(
        module = EDITOR_MODULE,
        host_version = %version,
        collision = options.collision_support,
        "resolved module"
    );
    Ok(descriptor)
}

/// Public dependencies of the editor module for a host version.
pub fn public_dependencies(version: &HostVersion) -> Vec<&'static str> {
    let mut deps = vec!["Core"];
    if version.at_least(MESH_DESCRIPTION_SINCE.0, MESH_DESCRIPTION_SINCE.1) {
        deps.push("MeshDescription");
    }
    deps.extend([RUNTIME_MODULE, "UnrealEd", "SourceControl"]);
    deps
}

/// Private dependencies of the editor module for a host version.
pub fn private_dependencies(version: &HostVersion) -> Vec<&'static str> {
    let navigation = if version.at_least(NAVIGATION_SYSTEM_SINCE.0, NAVIGATION_SYSTEM_SINCE.1) {
        "NavigationSystem"
    } else {
        "NavMesh"
    };
    vec![
        "CoreUObject",
        "Engine",
        "RenderCore",
        "Slate",
        "SlateCore",
        "InputCore",
        "UnrealEd",
        "LevelEditor",
        "EditorStyle",
        "Projects",
        navigation,
        "RawMesh",
        "StaticMeshDescription",
        "Landscape",
        "DesktopWidgets",
        "PropertyEditor",
    ]
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use acoustics_targets::{LinkType, Platform};

    use super::*;
    use crate::fbx::{COLLISION_DEFINITION, SHARED_DEFINITION};

    fn layout() -> PluginLayout {
        PluginLayout::new("/tp", "/engine/ThirdParty")
    }

    fn env_at(version: HostVersion) -> TargetEnvironment {
        let mut env = TargetEnvironment::win64_development();
        env.host_version = version;
        env
    }

    fn resolve(env: &TargetEnvironment) -> ModuleDescriptor {
        resolve_editor_module(env, &layout(), &ResolverOptions::default()).unwrap()
    }

    #[test]
    fn before_4_20_uses_navmesh() {
        let d = resolve(&env_at(HostVersion::new(4, 19, 0)));
        assert!(d.private_dependencies.contains_str("NavMesh"));
        assert!(!d.private_dependencies.contains_str("NavigationSystem"));
        assert!(!d.public_dependencies.contains_str("MeshDescription"));
    }

    #[test]
    fn from_4_20_uses_navigation_system() {
        for minor in [20, 21] {
            let d = resolve(&env_at(HostVersion::new(4, minor, 0)));
            assert!(d.private_dependencies.contains_str("NavigationSystem"));
            assert!(!d.private_dependencies.contains_str("NavMesh"));
            assert!(!d.public_dependencies.contains_str("MeshDescription"));
        }
    }

    #[test]
    fn from_4_22_adds_mesh_description() {
        let d = resolve(&env_at(HostVersion::new(4, 22, 0)));
        assert!(d.private_dependencies.contains_str("NavigationSystem"));
        assert_eq!(d.public_dependencies.position(&"MeshDescription".to_string()), Some(1));
        assert_eq!(
            d.public_dependencies.as_slice(),
            &["Core", "MeshDescription", "ProjectAcoustics", "UnrealEd", "SourceControl"]
        );
    }

    #[test]
    fn navigation_replaces_navmesh_in_place() {
        let old = private_dependencies(&HostVersion::new(4, 18, 0));
        let new = private_dependencies(&HostVersion::new(5, 1, 0));
        assert_eq!(old.len(), new.len());
        let i = old.iter().position(|d| *d == "NavMesh").unwrap();
        assert_eq!(new[i], "NavigationSystem");
    }

    #[test]
    fn preprocessor_binding() {
        let d = resolve(&TargetEnvironment::win64_development());
        assert_eq!(d.artifacts.len(), 1);
        assert_eq!(
            d.artifact(ArtifactKind::Preprocessor),
            Some(Path::new("/tp/Win64/Release/Preprocessor.lib"))
        );
        assert_eq!(d.delay_load_dlls.as_slice(), &["Preprocessor.dll"]);
        let dep = d.runtime_dependencies.iter().next().unwrap();
        assert_eq!(dep.path, PathBuf::from("/tp/Win64/Release/Preprocessor.dll"));
        assert!(dep.source.is_none());
    }

    #[test]
    fn preprocessor_ignores_requested_configuration() {
        let d = resolve(&TargetEnvironment::win64_debug());
        assert_eq!(
            d.artifact(ArtifactKind::Preprocessor),
            Some(Path::new("/tp/Win64/Release/Preprocessor.lib"))
        );
    }

    #[test]
    fn compile_settings() {
        let d = resolve(&TargetEnvironment::win64_development());
        assert_eq!(d.compile.pch_usage, PchUsage::Default);
        assert_eq!(d.compile.private_pch_header.as_deref(), Some(PRIVATE_PCH_HEADER));
        assert_eq!(d.private_include_paths.len(), 2);
        assert!(d.public_include_paths.is_empty());
    }

    #[test]
    fn unsupported_host_version() {
        let err = resolve_editor_module(
            &env_at(HostVersion::new(3, 27, 0)),
            &layout(),
            &ResolverOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RulesError::UnsupportedHostVersion { .. }));
    }

    #[test]
    fn collision_support_merges_fbx_on_win64() {
        let options = ResolverOptions {
            collision_support: true,
            ..ResolverOptions::default()
        };
        let env = TargetEnvironment::win64_development();
        let base = resolve(&env);
        let d = resolve_editor_module(&env, &layout(), &options).unwrap();

        assert_eq!(d.artifacts.len(), base.artifacts.len() + 1);
        assert!(d.artifact(ArtifactKind::FbxSdk).is_some());
        assert!(d.public_definitions.contains_str(COLLISION_DEFINITION));
        assert!(d.public_definitions.contains_str(SHARED_DEFINITION));
        assert_eq!(d.public_system_include_paths.len(), 2);
        assert_eq!(d.runtime_dependencies.len(), 2);
        assert_eq!(d.public_dependencies, base.public_dependencies);
        assert_eq!(d.private_dependencies, base.private_dependencies);
    }

    #[test]
    fn collision_support_ignored_off_win64() {
        let options = ResolverOptions {
            collision_support: true,
            ..ResolverOptions::default()
        };
        let mut env = TargetEnvironment::win32_release();
        env.link_type = LinkType::Monolithic;
        assert_eq!(env.platform, Platform::Win32);
        let with = resolve_editor_module(&env, &layout(), &options).unwrap();
        let without = resolve(&env);
        assert_eq!(with, without);
    }

    #[test]
    fn library_prefix_applies_to_preprocessor() {
        let options = ResolverOptions {
            library_prefix: "Triton.".into(),
            ..ResolverOptions::default()
        };
        let d = resolve_editor_module(&TargetEnvironment::win64_development(), &layout(), &options)
            .unwrap();
        assert_eq!(d.delay_load_dlls.as_slice(), &["Triton.Preprocessor.dll"]);
        assert_eq!(
            d.artifact(ArtifactKind::Preprocessor),
            Some(Path::new("/tp/Win64/Release/Triton.Preprocessor.lib"))
        );
    }
}
