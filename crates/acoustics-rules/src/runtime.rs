//! Rules for the runtime module (simulation runtime, codec, zlib).

use acoustics_targets::TargetEnvironment;

use crate::descriptor::{
    ArtifactKind, CodeOptimization, CompileSettings, DescriptorBuilder, ModuleDescriptor, PchUsage,
};
use crate::error::{Result, RulesError};
use crate::naming::platform_libraries;
use crate::options::{PluginLayout, ResolverOptions};

/// Name of the runtime module.
pub const RUNTIME_MODULE: &str = "ProjectAcoustics";

const PUBLIC_INCLUDES: [&str; 2] = ["Runtime/Engine", "Runtime/Core"];

const PRIVATE_INCLUDES: [&str; 4] = [
    "ProjectAcoustics/Public",
    "../ThirdParty/Include",
    "ProjectAcoustics/Private",
    "../../Wwise/Source/AkAudio/Public",
];

const PUBLIC_DEPENDENCIES: [&str; 5] = ["Core", "CoreUObject", "Engine", "Projects", "AudioMixer"];

const PRIVATE_DEPENDENCIES: [&str; 5] = ["Core", "CoreUObject", "Engine", "AudioMixer", "AkAudio"];

/// Resolve the runtime module for `env`.
///
/// Fails with [`RulesError::UnsupportedPlatform`] when no binaries ship for
/// the platform instead of emitting a path with an empty folder.
pub fn resolve_runtime_module(
    env: &TargetEnvironment,
    layout: &PluginLayout,
    options: &ResolverOptions,
) -> Result<ModuleDescriptor> {
    let libs = platform_libraries(env.platform).ok_or(RulesError::UnsupportedPlatform {
        platform: env.platform,
        module: RUNTIME_MODULE,
    })?;

    let mut lib_dir = layout.third_party_dir.join(libs.arch_folder);
    if libs.per_configuration {
        lib_dir.push(env.artifact_configuration().folder());
    }
    tracing::debug!(
        platform = %env.platform,
        requested = %env.configuration,
        linked = %env.artifact_configuration(),
        dir = %lib_dir.display(),
        "selected runtime library folder"
    );

    let mut builder = DescriptorBuilder::new(RUNTIME_MODULE);
    builder.compile(compile_settings(options));

    for path in PUBLIC_INCLUDES {
        builder.public_include(path);
    }
    builder.public_include(layout.include_dir());
    for path in PRIVATE_INCLUDES {
        builder.private_include(path);
    }
    for name in PUBLIC_DEPENDENCIES {
        builder.public_dependency(name);
    }
    for name in PRIVATE_DEPENDENCIES {
        builder.private_dependency(name);
    }

    let prefix = options.library_prefix.as_str();
    builder
        .artifact(ArtifactKind::Runtime, lib_dir.join(libs.runtime(prefix)))
        .artifact(ArtifactKind::Codec, lib_dir.join(libs.codec(prefix)))
        .artifact(ArtifactKind::Compression, lib_dir.join(libs.compression));

    let descriptor = builder.build();
    tracing::info!(
        module = RUNTIME_MODULE,
        platform = %env.platform,
        artifacts = descriptor.artifacts.len(),
        "resolved module"
    );
    Ok(descriptor)
}

fn compile_settings(options: &ResolverOptions) -> CompileSettings {
    if options.debugging {
        CompileSettings {
            pch_usage: PchUsage::Default,
            optimize_code: CodeOptimization::InShippingBuildsOnly,
            private_pch_header: None,
        }
    } else {
        CompileSettings {
            pch_usage: PchUsage::UseExplicitOrSharedPchs,
            optimize_code: CodeOptimization::Default,
            private_pch_header: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use acoustics_targets::{BuildConfiguration, Platform};

    use super::*;

    fn layout() -> PluginLayout {
        PluginLayout::new("/tp", "/engine/ThirdParty")
    }

    fn resolve(env: &TargetEnvironment) -> ModuleDescriptor {
        resolve_runtime_module(env, &layout(), &ResolverOptions::default()).unwrap()
    }

    fn artifact_paths(d: &ModuleDescriptor) -> Vec<PathBuf> {
        d.artifacts.iter().map(|a| a.path.clone()).collect()
    }

    #[test]
    fn win64_release_paths() {
        let d = resolve(&TargetEnvironment::win64_development());
        assert_eq!(
            artifact_paths(&d),
            vec![
                PathBuf::from("/tp/Win64/Release/Runtime.lib"),
                PathBuf::from("/tp/Win64/Release/Codec.lib"),
                PathBuf::from("/tp/Win64/Release/zlibstatic.lib"),
            ]
        );
    }

    #[test]
    fn win64_debug_with_opt_in() {
        let d = resolve(&TargetEnvironment::win64_debug());
        assert_eq!(
            d.artifact(ArtifactKind::Runtime),
            Some(Path::new("/tp/Win64/Debug/Runtime.lib"))
        );
    }

    #[test]
    fn debug_without_opt_in_links_release() {
        let mut env = TargetEnvironment::win64_debug();
        env.debug_crt_opt_in = false;
        let d = resolve(&env);
        assert_eq!(
            d.artifact(ArtifactKind::Codec),
            Some(Path::new("/tp/Win64/Release/Codec.lib"))
        );
    }

    #[test]
    fn android_has_no_config_folder() {
        let mut env = TargetEnvironment::android_release();
        env.configuration = BuildConfiguration::Debug;
        env.debug_crt_opt_in = true;
        let d = resolve(&env);
        assert_eq!(
            artifact_paths(&d),
            vec![
                PathBuf::from("/tp/Android_armeabi-v7a/libRuntime.a"),
                PathBuf::from("/tp/Android_armeabi-v7a/libCodec.a"),
                PathBuf::from("/tp/Android_armeabi-v7a/libz.a"),
            ]
        );
    }

    #[test]
    fn xbox_uses_plain_zlib() {
        let d = resolve(&TargetEnvironment::xbox_one_release());
        assert_eq!(
            d.artifact(ArtifactKind::Compression),
            Some(Path::new("/tp/XboxOne/Release/zlib.lib"))
        );
    }

    #[test]
    fn unmapped_platform_fails_closed() {
        let mut env = TargetEnvironment::win64_development();
        env.platform = Platform::Mac;
        let err = resolve_runtime_module(&env, &layout(), &ResolverOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            RulesError::UnsupportedPlatform { platform: Platform::Mac, module: RUNTIME_MODULE }
        ));
    }

    #[test]
    fn includes_and_dependencies() {
        let d = resolve(&TargetEnvironment::win64_development());
        let public: Vec<_> = d.public_include_paths.iter().cloned().collect();
        assert_eq!(
            public,
            vec![
                PathBuf::from("Runtime/Engine"),
                PathBuf::from("Runtime/Core"),
                PathBuf::from("/tp/Include"),
            ]
        );
        assert_eq!(d.private_include_paths.len(), 4);
        assert_eq!(d.public_dependencies.len(), 5);
        assert!(d.private_dependencies.contains_str("AkAudio"));
        assert!(!d.public_dependencies.contains_str("AkAudio"));
        assert!(d.dynamically_loaded.is_empty());
        assert!(d.delay_load_dlls.is_empty());
    }

    #[test]
    fn debugging_option_changes_compile_settings() {
        let env = TargetEnvironment::win64_development();
        let normal = resolve(&env);
        assert_eq!(normal.compile.pch_usage, PchUsage::UseExplicitOrSharedPchs);

        let options = ResolverOptions {
            debugging: true,
            ..ResolverOptions::default()
        };
        let debugging = resolve_runtime_module(&env, &layout(), &options).unwrap();
        assert_eq!(debugging.compile.pch_usage, PchUsage::Default);
        assert_eq!(debugging.compile.optimize_code, CodeOptimization::InShippingBuildsOnly);
        assert_eq!(debugging.artifacts, normal.artifacts);
    }

    #[test]
    fn library_prefix() {
        let options = ResolverOptions {
            library_prefix: "Triton.".into(),
            ..ResolverOptions::default()
        };
        let d = resolve_runtime_module(&TargetEnvironment::win64_development(), &layout(), &options)
            .unwrap();
        assert_eq!(
            d.artifact(ArtifactKind::Runtime),
            Some(Path::new("/tp/Win64/Release/Triton.Runtime.lib"))
        );
        assert_eq!(
            d.artifact(ArtifactKind::Compression),
            Some(Path::new("/tp/Win64/Release/zlibstatic.lib"))
        );
    }
}
