//! Integration tests for the placeholder patcher

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use reloc_errors::PatchError;
    use reloc_patch::placeholder::INTERPRETER_LEN;
    use reloc_patch::*;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    fn dir_entries(dir: &Path) -> Vec<PathBuf> {
        let mut entries: Vec<PathBuf> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        entries.sort();
        entries
    }

    fn cache_target(path: &Path, replacement: &str) -> PatchTarget {
        PatchTarget::new(path, Placeholder::cache(), replacement, PaddingMode::Exact).unwrap()
    }

    #[test]
    fn test_end_to_end_cache_line() {
        let temp = tempdir().unwrap();
        let cache = temp.path().join("loaders.cache");
        fs::write(&cache, b"path=PATCHMEPATCHME/extra\n").unwrap();

        let report = patch_file(&cache_target(&cache, "/opt/app/resources")).unwrap();

        assert_eq!(report.replacements, 1);
        assert!(report.rewritten);
        assert_eq!(fs::read(&cache).unwrap(), b"path=/opt/app/resources/extra\n");
        assert_eq!(dir_entries(temp.path()), vec![cache]);
    }

    #[test]
    fn test_no_occurrences_leaves_file_identical() {
        let temp = tempdir().unwrap();
        let cache = temp.path().join("immodules.cache");
        let original = b"\"/usr/lib/gtk-3.0/3.0.0/immodules/im-am-et.so\"\n\0binary\xff\n";
        fs::write(&cache, original).unwrap();

        let report = patch_file(&cache_target(&cache, "/opt/app/resources")).unwrap();

        assert_eq!(report.replacements, 0);
        assert!(!report.rewritten);
        assert_eq!(report.bytes_before, report.bytes_after);
        assert_eq!(fs::read(&cache).unwrap(), original);
    }

    #[test]
    fn test_many_occurrences_on_one_line() {
        let temp = tempdir().unwrap();
        let cache = temp.path().join("loaders.cache");
        fs::write(
            &cache,
            b"a PATCHMEPATCHME b PATCHMEPATCHMEPATCHMEPATCHME c PATCHMEPATCHME tail\nnext\n",
        )
        .unwrap();

        let report = patch_file(&cache_target(&cache, "/R")).unwrap();

        assert_eq!(report.replacements, 4);
        assert_eq!(fs::read(&cache).unwrap(), b"a /R b /R/R c /R tail\nnext\n");
    }

    #[test]
    fn test_occurrences_across_lines() {
        let temp = tempdir().unwrap();
        let cache = temp.path().join("loaders.cache");
        fs::write(
            &cache,
            b"\"PATCHMEPATCHME/lib/a.so\"\n\"PATCHMEPATCHME/lib/b.so\"\n",
        )
        .unwrap();

        let report = patch_file(&cache_target(&cache, "/x")).unwrap();

        assert_eq!(report.replacements, 2);
        assert_eq!(
            fs::read(&cache).unwrap(),
            b"\"/x/lib/a.so\"\n\"/x/lib/b.so\"\n"
        );
    }

    #[test]
    fn test_interpreter_field_keeps_size() {
        let temp = tempdir().unwrap();
        let launcher = temp.path().join("why3");

        // An ELF-ish blob: header bytes, the reserved field, trailing sections
        let mut blob = vec![0x7f, b'E', b'L', b'F', 2, 1, 1, 0];
        blob.extend_from_slice(&[0u8; 56]);
        blob.extend_from_slice(Placeholder::interpreter().as_bytes());
        blob.push(0);
        blob.extend((0..=255u8).cycle().take(1024));
        fs::write(&launcher, &blob).unwrap();

        let interp = "/opt/app/interp/ld.so";
        let target = PatchTarget::new(
            &launcher,
            Placeholder::interpreter(),
            interp,
            PaddingMode::ZeroPadded,
        )
        .unwrap();
        let report = patch_file(&target).unwrap();

        let patched = fs::read(&launcher).unwrap();
        assert_eq!(report.replacements, 1);
        assert_eq!(patched.len(), blob.len());
        assert_eq!(report.bytes_after, report.bytes_before);

        let field = &patched[64..64 + INTERPRETER_LEN];
        assert_eq!(&field[..interp.len()], interp.as_bytes());
        assert!(field[interp.len()..].iter().all(|&b| b == 0));
        assert_eq!(&patched[..64], &blob[..64]);
        assert_eq!(&patched[64 + INTERPRETER_LEN..], &blob[64 + INTERPRETER_LEN..]);
    }

    #[test]
    fn test_replacement_too_long_writes_nothing() {
        let temp = tempdir().unwrap();
        let launcher = temp.path().join("why3");
        let blob = [b"head".as_slice(), Placeholder::interpreter().as_bytes(), b"tail"].concat();
        fs::write(&launcher, &blob).unwrap();

        let long = format!("/{}", "d".repeat(INTERPRETER_LEN - 1));
        let err = PatchTarget::new(
            &launcher,
            Placeholder::interpreter(),
            long.as_str(),
            PaddingMode::ZeroPadded,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            PatchError::ReplacementTooLong {
                replacement_len: 256,
                pattern_len: 256,
                ..
            }
        ));
        assert_eq!(fs::read(&launcher).unwrap(), blob);
        assert_eq!(dir_entries(temp.path()), vec![launcher]);
    }

    #[cfg(unix)]
    #[test]
    fn test_permissions_preserved() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().unwrap();
        let launcher = temp.path().join("why3");
        fs::write(&launcher, b"#!PATCHMEPATCHME/bin/sh\n").unwrap();
        fs::set_permissions(&launcher, fs::Permissions::from_mode(0o751)).unwrap();

        patch_file(&cache_target(&launcher, "/opt")).unwrap();

        let mode = fs::metadata(&launcher).unwrap().permissions().mode() & 0o7777;
        assert_eq!(mode, 0o751);
        assert_eq!(fs::read(&launcher).unwrap(), b"#!/opt/bin/sh\n");
    }

    #[test]
    fn test_missing_source() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("lib/gtk-3.0/3.0.0/immodules.cache");

        let err = patch_file(&cache_target(&missing, "/opt")).unwrap_err();

        assert!(matches!(err, PatchError::CannotOpenSource { .. }));
        assert!(dir_entries(temp.path()).is_empty());
    }

    #[test]
    fn test_dropped_stage_leaves_original() {
        let temp = tempdir().unwrap();
        let cache = temp.path().join("loaders.cache");
        let original = b"dir=PATCHMEPATCHME\n";
        fs::write(&cache, original).unwrap();

        let staged = stage_patch(&cache_target(&cache, "/opt/app/resources")).unwrap();
        let temp_path = staged.temp_path().unwrap().to_path_buf();

        // Fully written but not yet renamed: the state a kill would leave
        assert_eq!(fs::read(&temp_path).unwrap(), b"dir=/opt/app/resources\n");
        assert_eq!(fs::read(&cache).unwrap(), original);
        assert!(!staged.report().rewritten);

        drop(staged);

        assert_eq!(fs::read(&cache).unwrap(), original);
        assert!(!temp_path.exists());
        assert_eq!(dir_entries(temp.path()), vec![cache]);
    }

    #[test]
    fn test_stage_without_matches_stages_nothing() {
        let temp = tempdir().unwrap();
        let cache = temp.path().join("loaders.cache");
        fs::write(&cache, b"already=/opt/app/resources\n").unwrap();

        let staged = stage_patch(&cache_target(&cache, "/opt/app/resources")).unwrap();
        assert!(staged.temp_path().is_none());
        assert_eq!(staged.destination(), cache.as_path());
        assert_eq!(dir_entries(temp.path()), vec![cache]);
    }

    #[test]
    fn test_second_run_is_a_no_op() {
        let temp = tempdir().unwrap();
        let cache = temp.path().join("loaders.cache");
        fs::write(&cache, b"x=PATCHMEPATCHME\n").unwrap();
        let target = cache_target(&cache, "/opt/app/resources");

        assert_eq!(patch_file(&target).unwrap().replacements, 1);
        let after_first = fs::read(&cache).unwrap();
        assert_eq!(patch_file(&target).unwrap().replacements, 0);
        assert_eq!(fs::read(&cache).unwrap(), after_first);
    }

    #[test]
    fn test_scan_file_does_not_write() {
        let temp = tempdir().unwrap();
        let cache = temp.path().join("loaders.cache");
        fs::write(&cache, b"x=PATCHMEPATCHME y=PATCHMEPATCHME\n").unwrap();

        let report = scan_file(&cache_target(&cache, "/o")).unwrap();

        assert_eq!(report.replacements, 2);
        assert!(!report.rewritten);
        assert_eq!(report.bytes_after, report.bytes_before - 24);
        assert_eq!(
            fs::read(&cache).unwrap(),
            b"x=PATCHMEPATCHME y=PATCHMEPATCHME\n"
        );
    }

    #[test]
    fn test_report_serializes() {
        let report = PatchReport {
            path: PathBuf::from("/opt/app/bin/why3"),
            mode: PaddingMode::ZeroPadded,
            replacements: 1,
            bytes_before: 10,
            bytes_after: 10,
            rewritten: true,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["mode"], "zero_padded");
        assert_eq!(json["replacements"], 1);
    }

    fn filler() -> impl Strategy<Value = Vec<u8>> {
        // No uppercase letters, so filler can never contain or complete a marker
        prop::collection::vec(
            prop_oneof![Just(0u8), Just(b'\n'), b'a'..=b'z', b'/'..=b'9'],
            0..64,
        )
    }

    proptest! {
        #[test]
        fn zero_padded_preserves_length(
            chunks in prop::collection::vec(filler(), 1..6),
            replacement in "/[a-z/]{0,12}",
        ) {
            let marker = Placeholder::cache();
            let input = chunks.join(marker.as_bytes());
            let target = PatchTarget::new(
                "field",
                marker,
                replacement.as_str(),
                PaddingMode::ZeroPadded,
            )
            .unwrap();
            let patched = target.apply(&input);

            prop_assert_eq!(patched.replacements, chunks.len() - 1);
            prop_assert_eq!(patched.bytes.len(), input.len());
        }

        #[test]
        fn exact_mode_equals_segment_join(
            chunks in prop::collection::vec(filler(), 1..6),
            replacement in "/[a-z/]{0,40}",
        ) {
            let input = chunks.join(Placeholder::cache().as_bytes());
            let target = PatchTarget::new(
                "cache",
                Placeholder::cache(),
                replacement.as_str(),
                PaddingMode::Exact,
            )
            .unwrap();
            let patched = target.apply(&input);

            prop_assert_eq!(patched.replacements, chunks.len() - 1);
            prop_assert_eq!(patched.bytes, chunks.join(replacement.as_bytes()));
        }

        #[test]
        fn no_marker_means_identity(input in filler()) {
            let target = PatchTarget::new(
                "cache",
                Placeholder::cache(),
                "/opt/app/resources",
                PaddingMode::Exact,
            )
            .unwrap();
            let patched = target.apply(&input);
            prop_assert_eq!(patched.replacements, 0);
            prop_assert_eq!(patched.bytes, input);
        }
    }
}
