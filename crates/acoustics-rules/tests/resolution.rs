//! End-to-end resolution properties across platforms, configurations and host versions.

use std::path::{Path, PathBuf};

use acoustics_rules::{
    ArtifactKind, ModuleKind, ModuleResolver, PluginLayout, ResolverOptions, RulesError,
};
use acoustics_targets::{BuildConfiguration, HostVersion, LinkType, Platform, TargetEnvironment};

fn resolver(options: ResolverOptions) -> ModuleResolver {
    ModuleResolver::new(PluginLayout::new("/root/ThirdParty", "/engine/Source/ThirdParty"), options)
}

fn env(platform: Platform, configuration: BuildConfiguration, opt_in: bool) -> TargetEnvironment {
    let mut env = TargetEnvironment::new("t", platform, configuration, HostVersion::new(4, 22, 0));
    env.debug_crt_opt_in = opt_in;
    env.compiler_version = Some("2017".into());
    env
}

#[test]
fn every_supported_platform_has_a_complete_artifact_triple() {
    let expected = [
        (Platform::Win32, "Win32/Release", ["Runtime.lib", "Codec.lib", "zlibstatic.lib"]),
        (Platform::Win64, "Win64/Release", ["Runtime.lib", "Codec.lib", "zlibstatic.lib"]),
        (Platform::Android, "Android_armeabi-v7a", ["libRuntime.a", "libCodec.a", "libz.a"]),
        (Platform::XboxOne, "XboxOne/Release", ["Runtime.lib", "Codec.lib", "zlib.lib"]),
    ];
    let resolver = resolver(ResolverOptions::default());
    for (platform, folder, names) in expected {
        let d = resolver
            .resolve_runtime_module(&env(platform, BuildConfiguration::Release, false))
            .unwrap();
        let dir = Path::new("/root/ThirdParty").join(folder);
        let kinds = [ArtifactKind::Runtime, ArtifactKind::Codec, ArtifactKind::Compression];
        for (kind, name) in kinds.into_iter().zip(names) {
            assert_eq!(d.artifact(kind), Some(dir.join(name).as_path()), "{platform} {kind}");
        }
    }
}

#[test]
fn unsupported_platforms_are_rejected() {
    let resolver = resolver(ResolverOptions::default());
    for platform in Platform::ALL.into_iter().filter(|p| !p.is_supported()) {
        let err = resolver
            .resolve_runtime_module(&env(platform, BuildConfiguration::Release, false))
            .unwrap_err();
        assert!(matches!(err, RulesError::UnsupportedPlatform { .. }), "{platform}");
        assert!(err.to_string().contains(platform.name()));
    }
}

#[test]
fn debug_artifacts_only_with_both_flags() {
    let resolver = resolver(ResolverOptions::default());
    let cases = [
        (BuildConfiguration::Debug, true, "Debug"),
        (BuildConfiguration::Debug, false, "Release"),
        (BuildConfiguration::Release, true, "Release"),
        (BuildConfiguration::Release, false, "Release"),
    ];
    for (configuration, opt_in, folder) in cases {
        let d = resolver
            .resolve_runtime_module(&env(Platform::Win64, configuration, opt_in))
            .unwrap();
        let expected = PathBuf::from("/root/ThirdParty/Win64").join(folder).join("Runtime.lib");
        assert_eq!(
            d.artifact(ArtifactKind::Runtime),
            Some(expected.as_path()),
            "{configuration} opt_in={opt_in}"
        );
    }
}

#[test]
fn editor_dependencies_by_host_version() {
    let resolver = resolver(ResolverOptions::default());
    let resolve_at = |major, minor| {
        let mut e = env(Platform::Win64, BuildConfiguration::Release, false);
        e.host_version = HostVersion::new(major, minor, 0);
        resolver.resolve_editor_module(&e).unwrap()
    };

    let old = resolve_at(4, 19);
    assert!(old.private_dependencies.contains_str("NavMesh"));
    assert!(!old.private_dependencies.contains_str("NavigationSystem"));
    assert!(!old.public_dependencies.contains_str("MeshDescription"));

    let mid = resolve_at(4, 21);
    assert!(mid.private_dependencies.contains_str("NavigationSystem"));
    assert!(!mid.private_dependencies.contains_str("NavMesh"));
    assert!(!mid.public_dependencies.contains_str("MeshDescription"));

    for (major, minor) in [(4, 22), (4, 27), (5, 3)] {
        let new = resolve_at(major, minor);
        assert!(new.private_dependencies.contains_str("NavigationSystem"));
        assert!(new.public_dependencies.contains_str("MeshDescription"));
    }
}

#[test]
fn collision_support_adds_one_fbx_subtree_on_win64_only() {
    let plain = resolver(ResolverOptions::default());
    let collision = resolver(ResolverOptions {
        collision_support: true,
        ..ResolverOptions::default()
    });

    for link_type in [LinkType::Modular, LinkType::Monolithic] {
        let mut e = env(Platform::Win64, BuildConfiguration::Release, false);
        e.link_type = link_type;
        let base = plain.resolve_editor_module(&e).unwrap();
        let with = collision.resolve_editor_module(&e).unwrap();

        let fbx: Vec<_> = with
            .artifacts
            .iter()
            .filter(|a| a.kind == ArtifactKind::FbxSdk)
            .collect();
        assert_eq!(fbx.len(), 1);
        assert_eq!(with.artifacts.len(), base.artifacts.len() + 1);
        let shared = with.public_definitions.contains_str("FBXSDK_SHARED");
        assert_eq!(shared, link_type == LinkType::Modular);
    }

    for platform in [Platform::Win32, Platform::Android, Platform::XboxOne] {
        let e = env(platform, BuildConfiguration::Release, false);
        assert_eq!(
            plain.resolve_editor_module(&e).unwrap(),
            collision.resolve_editor_module(&e).unwrap(),
            "{platform}"
        );
    }
}

#[test]
fn resolution_is_deterministic() {
    let resolver = resolver(ResolverOptions {
        collision_support: true,
        ..ResolverOptions::default()
    });
    let e = TargetEnvironment::win64_debug();
    for kind in ModuleKind::ALL {
        let first = serde_json::to_vec(&resolver.resolve(kind, &e).unwrap()).unwrap();
        let second = serde_json::to_vec(&resolver.resolve(kind, &e.clone()).unwrap()).unwrap();
        assert_eq!(first, second, "{kind}");
    }
}

#[test]
fn win64_release_example() {
    let d = resolver(ResolverOptions::default())
        .resolve_runtime_module(&env(Platform::Win64, BuildConfiguration::Release, false))
        .unwrap();
    let paths: Vec<_> = d.artifacts.iter().map(|a| a.path.clone()).collect();
    assert_eq!(
        paths,
        vec![
            PathBuf::from("/root/ThirdParty/Win64/Release/Runtime.lib"),
            PathBuf::from("/root/ThirdParty/Win64/Release/Codec.lib"),
            PathBuf::from("/root/ThirdParty/Win64/Release/zlibstatic.lib"),
        ]
    );
}

#[test]
fn descriptors_round_trip_through_json() {
    let resolver = resolver(ResolverOptions {
        collision_support: true,
        ..ResolverOptions::default()
    });
    let d = resolver
        .resolve_editor_module(&TargetEnvironment::win64_development())
        .unwrap();
    let json = serde_json::to_string_pretty(&d).unwrap();
    let back: acoustics_rules::ModuleDescriptor = serde_json::from_str(&json).unwrap();
    assert_eq!(back, d);
}
