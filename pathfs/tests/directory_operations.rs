//! Directory operations and listing, run against every backend.

mod common;

use std::collections::BTreeSet;

use common::{file_names, Scratch};
use pathfs::{FileSystem, FileSystemExt, Path};

fn walk(fs: &dyn FileSystem, dir: &Path) -> BTreeSet<Path> {
    let mut seen = BTreeSet::new();
    fs.walk_directory(dir, &mut |p| {
        seen.insert(p.clone());
    })
    .unwrap();
    seen
}

#[test]
fn test_create_directory() {
    for s in Scratch::all() {
        let dir = s.dir("create-directory");
        assert!(s.fs.is_directory(&dir).unwrap(), "{}", s.name());
        assert!(!s.fs.is_regular_file(&dir).unwrap());
    }
}

#[test]
fn test_create_existing_directory_fails() {
    for s in Scratch::all() {
        let dir = s.dir("twice");
        assert!(s.fs.create_directory(&dir).unwrap_err().is_already_exists());
    }
}

#[test]
fn test_create_directory_without_parent_fails() {
    for s in Scratch::all() {
        let err = s.fs.create_directory(&s.child("a/b/c")).unwrap_err();
        assert!(err.is_not_found(), "{}: {err}", s.name());
    }
}

#[test]
fn test_delete_empty_directory() {
    for s in Scratch::all() {
        let dir = s.dir("empty");
        assert!(s.fs.delete(&dir).unwrap(), "{}", s.name());
        assert!(!s.fs.exists(&dir));
    }
}

#[test]
fn test_delete_non_empty_directory_fails() {
    for s in Scratch::all() {
        let dir = s.dir("full");
        s.file("full/inside.txt", b"keep");
        assert!(s.fs.delete(&dir).is_err(), "{}", s.name());
        assert!(s.fs.exists(&dir.join("inside.txt").unwrap()));
    }
}

#[test]
fn test_delete_recursively() {
    for s in Scratch::all() {
        let dir = s.dir("tree");
        s.dir("tree/a");
        s.dir("tree/a/b");
        s.file("tree/a/b/leaf.txt", b"leaf");
        s.file("tree/top.txt", b"top");

        assert!(s.fs.delete_recursively(&dir).unwrap(), "{}", s.name());
        assert!(!s.fs.exists(&dir));
    }
}

#[test]
fn test_copy_directory_is_shallow() {
    for s in Scratch::all() {
        let source = s.dir("source");
        s.file("source/child.txt", b"c");
        let target = s.child("target");

        s.fs.copy(&source, &target).unwrap();
        assert!(s.fs.is_directory(&target).unwrap(), "{}", s.name());
        assert!(s.fs.list(&target).unwrap().is_empty());
    }
}

#[test]
fn test_move_directory_keeps_contents() {
    for s in Scratch::all() {
        let source = s.dir("old");
        s.file("old/child.txt", b"c");
        let target = s.child("new");

        s.fs.move_path(&source, &target).unwrap();
        assert!(!s.fs.exists(&source), "{}", s.name());
        assert_eq!(
            s.fs.read_bytes(&target.join("child.txt").unwrap()).unwrap(),
            b"c"
        );
    }
}

#[test]
fn test_temporary_directory() {
    for s in Scratch::all() {
        let a = s.fs.create_temporary_directory("pathfs-test-").unwrap();
        let b = s.fs.create_temporary_directory("pathfs-test-").unwrap();
        assert_ne!(a, b, "{}", s.name());
        assert!(s.fs.is_directory(&a).unwrap());
        assert!(a.file_name().unwrap().as_str().starts_with("pathfs-test-"));
        s.fs.delete(&a).unwrap();
        s.fs.delete(&b).unwrap();
    }
}

#[test]
fn test_temporary_directory_lives_under_root() {
    for s in Scratch::all() {
        let root = s.fs.temporary_root().unwrap();
        let dir = s.fs.create_temporary_directory("rooted-").unwrap();
        assert_eq!(dir.parent().unwrap(), root, "{}", s.name());
        assert_eq!(root.origin(), s.fs.origin());
        s.fs.delete(&dir).unwrap();
    }
}

#[test]
fn test_non_existent_listing() {
    for s in Scratch::all() {
        let dir = s.child("non-existent-listing");
        assert!(s.fs.list(&dir).is_err(), "{}", s.name());
        assert!(s.fs.walk_directory(&dir, &mut |_| {}).is_err());
    }
}

#[test]
fn test_listing_a_file_fails() {
    for s in Scratch::all() {
        let file = s.file("plain.txt", b"");
        assert!(s.fs.list(&file).is_err(), "{}", s.name());
    }
}

#[test]
fn test_empty_listing() {
    for s in Scratch::all() {
        let dir = s.dir("empty-listing");
        assert!(s.fs.list(&dir).unwrap().is_empty(), "{}", s.name());
        assert!(walk(s.fs.as_ref(), &dir).is_empty());
    }
}

#[test]
fn test_listing() {
    for s in Scratch::all() {
        let dir = s.dir("listing");
        let file = s.file("listing/1.txt", b"");
        let sub = s.dir("listing/2");

        let listed = s.fs.list(&dir).unwrap();
        assert_eq!(file_names(&listed), ["1.txt", "2"], "{}", s.name());
        assert_eq!(listed, vec![file.clone(), sub.clone()]);
        assert_eq!(walk(s.fs.as_ref(), &dir), [file, sub].into_iter().collect());
    }
}

#[test]
fn test_nested_listing() {
    for s in Scratch::all() {
        let dir = s.dir("nested-listing");
        let file = s.file("nested-listing/1.txt", b"");
        let nested = s.dir("nested-listing/2");
        let deep = s.file("nested-listing/2/3.txt", b"");

        let listed: BTreeSet<Path> = s.fs.list(&dir).unwrap().into_iter().collect();
        assert_eq!(
            listed,
            [file.clone(), nested.clone()].into_iter().collect(),
            "{}",
            s.name()
        );

        let walked = walk(s.fs.as_ref(), &dir);
        assert_eq!(walked, [file, nested, deep].into_iter().collect());
    }
}

#[test]
fn test_listed_paths_are_built_from_directory() {
    for s in Scratch::all() {
        let dir = s.dir("spelled");
        s.file("spelled/x", b"");
        let respelled = s.fs.path(&format!("{}///", dir.as_str()), &[]).unwrap();
        let listed = s.fs.list(&respelled).unwrap();
        assert_eq!(listed, vec![dir.join("x").unwrap()], "{}", s.name());
        assert!(listed.iter().all(|p| p.origin() == s.fs.origin()));
    }
}
