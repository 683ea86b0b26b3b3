//! Per-platform file naming of the prebuilt simulation libraries.
//!
//! | Platform | Arch folder         | Runtime       | Codec       | Compression    |
//! |----------|---------------------|---------------|-------------|----------------|
//! | Win32    | Win32               | Runtime.lib   | Codec.lib   | zlibstatic.lib |
//! | Win64    | Win64               | Runtime.lib   | Codec.lib   | zlibstatic.lib |
//! | Android  | Android_armeabi-v7a | libRuntime.a  | libCodec.a  | libz.a         |
//! | XboxOne  | XboxOne             | Runtime.lib   | Codec.lib   | zlib.lib       |

use acoustics_targets::Platform;

/// Static library file convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryStyle {
    /// `<name>.lib`
    Msvc,
    /// `lib<name>.a`
    Archive,
}

impl LibraryStyle {
    /// File name of a static library with the given stem.
    pub fn file_name(self, stem: &str) -> String {
        match self {
            LibraryStyle::Msvc => format!("{stem}.lib"),
            LibraryStyle::Archive => format!("lib{stem}.a"),
        }
    }
}

/// Where and how a platform's simulation libraries are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformLibraries {
    pub arch_folder: &'static str,
    pub style: LibraryStyle,
    /// zlib file name; never prefixed.
    pub compression: &'static str,
    /// Whether artifacts sit in a Debug/Release subfolder.
    pub per_configuration: bool,
}

impl PlatformLibraries {
    pub fn runtime(&self, prefix: &str) -> String {
        self.style.file_name(&format!("{prefix}Runtime"))
    }

    pub fn codec(&self, prefix: &str) -> String {
        self.style.file_name(&format!("{prefix}Codec"))
    }
}

/// Library naming for `platform`, or `None` when no binaries ship for it.
pub fn platform_libraries(platform: Platform) -> Option<PlatformLibraries> {
    let arch_folder = platform.arch_folder()?;
    let (style, compression) = match platform {
        Platform::Win32 | Platform::Win64 => (LibraryStyle::Msvc, "zlibstatic.lib"),
        Platform::Android => (LibraryStyle::Archive, "libz.a"),
        Platform::XboxOne => (LibraryStyle::Msvc, "zlib.lib"),
        Platform::Mac | Platform::Linux | Platform::Ios | Platform::Ps4 | Platform::Switch => {
            return None
        }
    };
    Some(PlatformLibraries {
        arch_folder,
        style,
        compression,
        per_configuration: !platform.has_single_configuration(),
    })
}
