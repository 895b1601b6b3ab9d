use spacemap_scan::{
    FileTree, InaccessibleReason, Node, NodeKind, RecursiveScanner, ScanConfig,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn scan(root: &Path, depth: u32) -> FileTree {
    let config = ScanConfig::builder()
        .root(root)
        .max_display_depth(depth)
        .build()
        .unwrap();
    RecursiveScanner::new().scan(&config).unwrap()
}

fn write_bytes(path: &Path, len: usize) {
    fs::write(path, vec![b'x'; len]).unwrap();
}

/// root/{a/{x=100, y=50}, b.txt=30}
fn example_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir(root.join("a")).unwrap();
    write_bytes(&root.join("a/x"), 100);
    write_bytes(&root.join("a/y"), 50);
    write_bytes(&root.join("b.txt"), 30);
    temp
}

/// Five levels deep with files at every level.
fn deep_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    let mut dir = temp.path().to_path_buf();
    for level in 0..5 {
        write_bytes(&dir.join(format!("f{level}")), 10 * (level + 1));
        dir = dir.join(format!("d{level}"));
        fs::create_dir(&dir).unwrap();
    }
    write_bytes(&dir.join("leaf"), 7);
    temp
}

fn assert_sizes_consistent(node: &Node) {
    if let Some(children) = &node.children {
        let sum: u64 = children.iter().map(|c| c.size).sum();
        assert_eq!(node.size, sum, "size mismatch at {}", node.path.display());
        for child in children {
            assert_sizes_consistent(child);
        }
    }
}

#[test]
fn test_example_depth_one() {
    let temp = example_tree();
    let tree = scan(temp.path(), 1);

    assert_eq!(tree.root.size, 180);
    let children = tree.root.children();
    assert_eq!(children.len(), 2);

    assert_eq!(children[0].name.as_str(), "a");
    assert_eq!(children[0].size, 150);
    assert_eq!(children[0].kind, NodeKind::Directory);
    assert!(children[0].children.is_none());

    assert_eq!(children[1].name.as_str(), "b.txt");
    assert_eq!(children[1].size, 30);
    assert_eq!(children[1].kind, NodeKind::File);
}

#[test]
fn test_paths_are_absolute_and_unique() {
    let temp = example_tree();
    let tree = scan(temp.path(), 5);

    let mut seen = std::collections::HashSet::new();
    tree.root.walk(&mut |node, _| {
        assert!(node.path.is_absolute());
        assert!(seen.insert(node.path.clone()));
    });
    assert_eq!(seen.len(), 5);
    assert_eq!(tree.root.path, temp.path().canonicalize().unwrap());
}

#[test]
fn test_root_size_independent_of_depth() {
    let temp = deep_tree();
    let expected: u64 = (1..=5).map(|l| 10 * l).sum::<u64>() + 7;

    for depth in 0..=7 {
        let tree = scan(temp.path(), depth);
        assert_eq!(tree.root.size, expected, "depth {depth}");
        assert_eq!(tree.stats.total_files, 6);
    }
}

#[test]
fn test_no_children_beyond_display_depth() {
    let temp = deep_tree();

    for depth in 0..=6 {
        let tree = scan(temp.path(), depth);
        let mut deepest = 0;
        tree.root.walk(&mut |node, level| {
            deepest = deepest.max(level);
            if node.children.is_some() {
                assert!(level < depth, "children kept at level {level} with depth {depth}");
            }
        });
        assert!(deepest <= depth);
    }
}

#[test]
fn test_directory_size_is_sum_of_children() {
    let temp = deep_tree();
    let tree = scan(temp.path(), 10);
    assert_sizes_consistent(&tree.root);

    // Truncated directories still report their full subtree.
    let shallow = scan(temp.path(), 2);
    let d1 = shallow.root.find("d0/d1").unwrap();
    let full_d1 = tree.root.find("d0/d1").unwrap();
    assert!(d1.children.is_none());
    assert_eq!(d1.size, full_d1.size);
}

#[test]
fn test_scans_are_idempotent() {
    let temp = deep_tree();
    let first = scan(temp.path(), 3);
    let second = scan(temp.path(), 3);

    assert_eq!(first.root, second.root);
    assert_eq!(first.stats, second.stats);
}

#[test]
fn test_ties_broken_by_name() {
    let temp = TempDir::new().unwrap();
    for name in ["charlie", "alpha", "bravo"] {
        write_bytes(&temp.path().join(name), 8);
    }
    write_bytes(&temp.path().join("zulu"), 9);

    let tree = scan(temp.path(), 1);
    let names: Vec<_> = tree.root.children().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["zulu", "alpha", "bravo", "charlie"]);
}

#[test]
fn test_empty_root() {
    let temp = TempDir::new().unwrap();
    let tree = scan(temp.path(), 3);

    assert!(tree.root.is_dir());
    assert_eq!(tree.root.size, 0);
    assert_eq!(tree.root.children, Some(Vec::new()));
}

#[cfg(unix)]
mod unix {
    use super::*;
    use std::os::unix::fs::{PermissionsExt, symlink};

    #[test]
    fn test_self_referential_symlink_terminates() {
        let temp = example_tree();
        let root = temp.path();
        symlink(root, root.join("a/loop")).unwrap();
        symlink(".", root.join("here")).unwrap();

        let tree = scan(root, 10);

        let link = tree.root.find("a/loop").unwrap();
        assert_eq!(link.kind, NodeKind::File);
        assert!(link.children.is_none());
        assert_eq!(tree.stats.total_symlinks, 2);

        let link_sizes: u64 = [root.join("a/loop"), root.join("here")]
            .iter()
            .map(|p| fs::symlink_metadata(p).unwrap().len())
            .sum();
        assert_eq!(tree.root.size, 180 + link_sizes);
        assert_sizes_consistent(&tree.root);
    }

    #[test]
    fn test_sibling_symlink_not_double_counted() {
        let temp = example_tree();
        let root = temp.path();
        symlink(root.join("a"), root.join("a_again")).unwrap();

        let tree = scan(root, 10);

        let link = tree.root.child("a_again").unwrap();
        assert!(link.is_file());
        let link_size = fs::symlink_metadata(root.join("a_again")).unwrap().len();
        assert_eq!(link.size, link_size);
        assert_eq!(tree.root.size, 180 + link_size);
    }

    #[test]
    fn test_hard_links_counted_per_parent() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir(root.join("one")).unwrap();
        fs::create_dir(root.join("two")).unwrap();
        write_bytes(&root.join("one/data"), 64);
        fs::hard_link(root.join("one/data"), root.join("two/data")).unwrap();

        let tree = scan(root, 3);

        assert_eq!(tree.root.child("one").unwrap().size, 64);
        assert_eq!(tree.root.child("two").unwrap().size, 64);
        assert_eq!(tree.root.size, 128);
    }

    #[test]
    fn test_locked_directory_is_inaccessible() {
        let temp = example_tree();
        let root = temp.path();
        let locked = root.join("locked");
        fs::create_dir(&locked).unwrap();
        write_bytes(&locked.join("hidden_bytes"), 500);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can list it anyway; nothing to assert then.
        let privileged = fs::read_dir(&locked).is_ok();
        let tree = scan(root, 3);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        if privileged {
            return;
        }

        let node = tree.root.child("locked").unwrap();
        assert_eq!(node.kind, NodeKind::Inaccessible);
        assert_eq!(node.size, 0);
        assert!(node.children.is_none());
        assert_eq!(tree.root.size, 180);
        assert_eq!(tree.stats.total_inaccessible, 1);
        assert_eq!(tree.inaccessible.len(), 1);
        assert_eq!(tree.inaccessible[0].reason, InaccessibleReason::PermissionDenied);
    }

    #[test]
    fn test_locked_directory_below_display_depth_is_recorded() {
        let temp = example_tree();
        let root = temp.path();
        let locked = root.join("a/locked");
        fs::create_dir(&locked).unwrap();
        write_bytes(&locked.join("bytes"), 500);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let privileged = fs::read_dir(&locked).is_ok();
        let tree = scan(root, 1);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        if privileged {
            return;
        }

        assert_eq!(tree.root.child("a").unwrap().size, 150);
        assert_eq!(tree.inaccessible.len(), 1);
        assert!(tree.inaccessible[0].path.ends_with("a/locked"));
    }

    #[test]
    fn test_unreadable_root_is_fatal() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("closed");
        fs::create_dir(&root).unwrap();
        fs::set_permissions(&root, fs::Permissions::from_mode(0o000)).unwrap();

        let privileged = fs::read_dir(&root).is_ok();
        let result = RecursiveScanner::new().scan(&ScanConfig::new(&root));
        fs::set_permissions(&root, fs::Permissions::from_mode(0o755)).unwrap();
        if privileged {
            return;
        }

        assert!(matches!(result, Err(spacemap_scan::ScanError::RootUnreadable { .. })));
    }
}
