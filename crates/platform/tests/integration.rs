//! Integration tests for bundle layouts

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use reloc_config::ResourceConfig;
    use reloc_errors::ResolveError;
    use reloc_platform::*;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_apple_bundle_layout() {
        let paths = AppleBundleLayout
            .resolve_paths(Path::new("/opt/app/Contents/Resources/bin/relocate"))
            .unwrap();
        assert_eq!(
            paths.resources_dir.as_path(),
            Path::new("/opt/app/Contents/Resources")
        );
        assert_eq!(paths.bundle_root.as_path(), Path::new("/opt/app"));
    }

    #[test]
    fn test_flat_layout() {
        let paths = FlatLayout
            .resolve_paths(Path::new("/opt/app/bin/relocate"))
            .unwrap();
        assert_eq!(paths.bundle_root.as_path(), Path::new("/opt/app"));
        assert_eq!(paths.resources_dir.as_path(), Path::new("/opt/app/resources"));
        assert!(FlatLayout.patches_interpreter());
        assert!(!AppleBundleLayout.patches_interpreter());
    }

    #[test]
    fn test_launch_layout_and_app_path() {
        let layout = LaunchLayout::new(PlatformFamily::Flat);
        let paths = layout.resolve_paths(Path::new("/opt/app/bin/why3")).unwrap();
        assert_eq!(paths.bundle_root.as_path(), Path::new("/opt/app"));
        assert_eq!(paths.resources_dir.as_path(), Path::new("/opt/app/resources"));

        let app = layout.app_path(&paths.bundle_root, "why3").unwrap();
        assert_eq!(app.as_path(), Path::new("/opt/app/exe/why3"));
    }

    #[test]
    fn test_launch_layout_is_flat_even_on_apple() {
        let layout = LaunchLayout::new(PlatformFamily::Apple);
        let paths = layout
            .resolve_paths(Path::new("/Applications/Why3.app/Contents/Resources/bin/why3"))
            .unwrap();
        assert_eq!(
            paths.bundle_root.as_path(),
            Path::new("/Applications/Why3.app/Contents/Resources")
        );
        assert_eq!(
            paths.resources_dir.as_path(),
            Path::new("/Applications/Why3.app/Contents/Resources/resources")
        );
    }

    #[test]
    fn test_relative_executable_rejected() {
        let err = FlatLayout
            .resolve_paths(Path::new("bin/relocate"))
            .unwrap_err();
        assert!(matches!(err, ResolveError::RelativePath { .. }));
    }

    #[test]
    fn test_too_shallow_executable() {
        let err = AppleBundleLayout
            .resolve_paths(Path::new("/bin/relocate"))
            .unwrap_err();
        assert!(matches!(err, ResolveError::NoParent { .. }));
    }

    #[test]
    fn test_resources_suffix_over_limit() {
        // Fits as an executable path, but not once `/resources` is appended
        let limit = PlatformFamily::Flat.path_limit();
        let root = format!("/{}", "a".repeat(limit - 8));
        let exe = format!("{root}/b/x");
        assert!(exe.len() < limit);

        let err = FlatLayout.resolve_paths(Path::new(&exe)).unwrap_err();
        assert!(matches!(err, ResolveError::PathTooLong { .. }));
    }

    #[test]
    fn test_environment_layout_flat() {
        let paths = FlatLayout
            .resolve_paths(Path::new("/opt/app/bin/relocate"))
            .unwrap();
        let vars = FlatLayout
            .environment_layout(&paths.resources_dir, &ResourceConfig::default())
            .unwrap();

        let pairs: Vec<(&str, PathBuf)> = vars.into_iter().map(|v| (v.name, v.value)).collect();
        assert_eq!(
            pairs,
            vec![
                (
                    "GDK_PIXBUF_MODULE_FILE",
                    PathBuf::from("/opt/app/resources/lib/gdk-pixbuf-2.0/2.10.0/loaders.cache")
                ),
                (
                    "GTK_IM_MODULE_FILE",
                    PathBuf::from("/opt/app/resources/lib/gtk-3.0/3.0.0/immodules.cache")
                ),
                ("XDG_DATA_HOME", PathBuf::from("/opt/app/resources/share")),
                ("FONTCONFIG_PATH", PathBuf::from("/opt/app/resources/etc/fonts")),
            ]
        );
    }

    #[test]
    fn test_environment_layout_apple_has_no_fontconfig() {
        let layout = LaunchLayout::new(PlatformFamily::Apple);
        let paths = layout.resolve_paths(Path::new("/opt/app/bin/why3")).unwrap();
        let vars = layout
            .environment_layout(&paths.resources_dir, &ResourceConfig::default())
            .unwrap();
        assert_eq!(vars.len(), 3);
        assert!(vars.iter().all(|v| v.name != "FONTCONFIG_PATH"));
    }

    proptest! {
        #[test]
        fn flat_root_is_two_dirnames_up(
            segments in prop::collection::vec("[a-zA-Z0-9_.-]{1,12}", 0..6),
            exe in "[a-z]{1,10}",
        ) {
            prop_assume!(segments.iter().all(|s| s != "." && s != ".."));
            let mut root = PathBuf::from("/");
            for segment in &segments {
                root.push(segment);
            }
            let executable = root.join("bin").join(&exe);

            let paths = FlatLayout.resolve_paths(&executable).unwrap();
            prop_assert_eq!(paths.bundle_root.as_path(), root.as_path());
            prop_assert_eq!(paths.resources_dir.into_path_buf(), root.join("resources"));
        }
    }
}
