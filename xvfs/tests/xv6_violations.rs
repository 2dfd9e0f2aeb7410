// SPDX-License-Identifier: MIT

use xvfs::xv6::*;

fn report(img: &[u8], opt: &Xv6CheckOptions) -> VerifyReport {
    let io = MemImageIO::new(img);
    let meta = Xv6Meta::from_io(&io).expect("geometry");
    Xv6Checker::new(&io, &meta).check_with(opt).expect("check")
}

fn first(img: &[u8]) -> Option<Violation> {
    report(img, &Xv6CheckOptions::default()).first_violation()
}

#[test]
fn bad_inode_type() {
    let mut b = Xv6ImageBuilder::new();
    let file = b.create_file(XV6_ROOTINO, "f", 1);
    b.inode_mut(file).kind = 7;
    assert_eq!(first(&b.build()), Some(Violation::BadInode));
}

#[test]
fn bad_indirect_pointer() {
    let mut b = Xv6ImageBuilder::new();
    let file = b.create_file(XV6_ROOTINO, "f", 0);
    let size = b.meta().size;
    b.inode_mut(file).addrs[XV6_NDIRECT] = size;
    assert_eq!(first(&b.build()), Some(Violation::BadIndirectAddress));
}

#[test]
fn root_is_not_a_directory() {
    let mut b = Xv6ImageBuilder::new();
    b.inode_mut(XV6_ROOTINO).kind = XV6_T_FILE;
    assert_eq!(first(&b.build()), Some(Violation::RootDirDoesNotExist));
}

#[test]
fn root_parent_is_not_root() {
    let mut b = Xv6ImageBuilder::new();
    let dir = b.mkdir(XV6_ROOTINO, "d");
    let block = b.inode_mut(XV6_ROOTINO).addrs[0];
    b.write_dirent(block, 1, Xv6DirEntry::dotdot(dir as u16));
    assert_eq!(first(&b.build()), Some(Violation::RootDirDoesNotExist));
}

#[test]
fn bitmap_marks_unused_block() {
    let mut b = Xv6ImageBuilder::new();
    let end = b.meta().data_region_end();
    b.set_bitmap(end, true);
    assert_eq!(first(&b.build()), Some(Violation::MissingInodeMark));
}

#[test]
fn free_inode_with_leftover_block_is_clean() {
    let mut b = Xv6ImageBuilder::new();
    let file = b.create_file(XV6_ROOTINO, "f", 1);
    let block = b.inode_mut(file).addrs[0];
    let stale = b.alloc_inode(XV6_T_UNUSED);
    b.inode_mut(stale).addrs[0] = block;
    assert_eq!(first(&b.build()), None);
}

#[test]
fn direct_block_shared_by_two_inodes() {
    let mut b = Xv6ImageBuilder::new();
    let a = b.create_file(XV6_ROOTINO, "a", 1);
    let c = b.create_file(XV6_ROOTINO, "c", 0);
    let shared = b.inode_mut(a).addrs[0];
    b.inode_mut(c).addrs[0] = shared;
    assert_eq!(first(&b.build()), Some(Violation::MultipleDirectBlocksInUse));
}

#[test]
fn indirect_leaf_shared_by_two_inodes() {
    let mut b = Xv6ImageBuilder::new();
    let a = b.create_file(XV6_ROOTINO, "a", XV6_NDIRECT + 1);
    let c = b.create_file(XV6_ROOTINO, "c", XV6_NDIRECT + 1);
    let leaf_a = b.inode_mut(a).indirect() as u64 * XV6_BSIZE as u64;
    let leaf_c = b.inode_mut(c).indirect() as u64 * XV6_BSIZE as u64;
    let shared = b.read_u32(leaf_a);
    let dropped = b.read_u32(leaf_c);
    b.write_u32(leaf_c, shared);
    b.set_bitmap(dropped, false);
    assert_eq!(
        first(&b.build()),
        Some(Violation::MultipleIndirectBlocksInUse)
    );
}

#[test]
fn inode_in_use_without_a_name() {
    let mut b = Xv6ImageBuilder::new();
    b.alloc_inode(XV6_T_FILE);
    assert_eq!(
        first(&b.build()),
        Some(Violation::DirectoryMismatchInodeInUse)
    );
}

#[test]
fn name_for_a_free_inode() {
    let mut b = Xv6ImageBuilder::new();
    b.add_entry(XV6_ROOTINO, "ghost", 42);
    assert_eq!(
        first(&b.build()),
        Some(Violation::DirectoryMismatchInodeFree)
    );
}

#[test]
fn name_past_the_inode_table() {
    let mut b = Xv6ImageBuilder::new();
    let ninodes = b.meta().ninodes;
    b.add_entry(XV6_ROOTINO, "far", ninodes + 1);
    assert_eq!(
        first(&b.build()),
        Some(Violation::DirectoryMismatchInodeFree)
    );
}

#[test]
fn fail_fast_reports_earliest_phase_only() {
    let mut b = Xv6ImageBuilder::new();
    let bad = b.create_file(XV6_ROOTINO, "bad", 0);
    b.inode_mut(bad).kind = 9;
    let end = b.meta().data_region_end();
    b.set_bitmap(end, true);
    let file = b.create_file(XV6_ROOTINO, "f", 0);
    b.inode_mut(file).nlink = 4;
    let img = b.build();

    let fast = report(&img, &Xv6CheckOptions::default());
    assert_eq!(fast.violations().collect::<Vec<_>>(), vec![Violation::BadInode]);

    let all = report(&img, &Xv6CheckOptions::collect_all());
    assert_eq!(
        all.violations().collect::<Vec<_>>(),
        vec![
            Violation::BadInode,
            Violation::MissingInodeMark,
            Violation::BadReferenceCountFile,
        ]
    );
}

#[test]
fn stats_are_reported_as_info() {
    let mut b = Xv6ImageBuilder::new();
    let dir = b.mkdir(XV6_ROOTINO, "d");
    b.create_file(dir, "f", 2);
    let img = b.build();

    let io = MemImageIO::new(&img);
    let meta = Xv6Meta::from_io(&io).unwrap();
    let mut checker = Xv6Checker::new(&io, &meta);
    let rep = checker.check_all().unwrap();

    assert!(rep.ok());
    assert_eq!(checker.stats.inodes_checked, meta.ninodes as usize);
    assert_eq!(checker.stats.inodes_in_use, 3);
    assert_eq!(checker.stats.dirs_visited, 2);
    assert_eq!(checker.stats.files_found, 1);
    // root block, d block, two file blocks
    assert_eq!(checker.stats.blocks_referenced, 4);
    assert!(rep.findings.iter().any(|f| f.code == "DIR.WALK"));
}

#[test]
fn truncated_image_is_an_io_error() {
    let img = Xv6ImageBuilder::new().build();
    let meta_only = &img[..29 * XV6_BSIZE];

    let io = MemImageIO::new(meta_only);
    let meta = Xv6Meta::from_io(&io).unwrap();
    let err = Xv6Checker::new(&io, &meta).check_all().unwrap_err();

    assert!(matches!(
        err,
        FsCheckerError::IO(ImageIOError::OutOfRange { .. })
            | FsCheckerError::Parsing(FsParsingError::IO(ImageIOError::OutOfRange { .. }))
    ));
}

#[test]
fn read_error_keeps_earlier_findings() {
    let mut b = Xv6ImageBuilder::new();
    let bad = b.create_file(XV6_ROOTINO, "bad", 0);
    b.inode_mut(bad).kind = 9;
    // 2 dot entries + 31 names spill root into a second block
    for i in 0..XV6_DPB - 2 {
        b.create_file(XV6_ROOTINO, &format!("f{i}"), 0);
    }
    let img = b.build();
    let second = root_second_block(&img);
    let io = MemImageIO::new(&img[..second as usize * XV6_BSIZE]);
    let meta = Xv6Meta::from_io(&io).unwrap();
    let mut checker = Xv6Checker::new(&io, &meta);
    checker.fast_check().unwrap();

    let mut rep = VerifyReport::default();
    let err = checker
        .check_into(&Xv6CheckOptions::collect_all(), &mut rep)
        .unwrap_err();

    assert!(matches!(
        err,
        FsCheckerError::Parsing(FsParsingError::IO(ImageIOError::OutOfRange { .. }))
    ));
    assert_eq!(rep.violations().collect::<Vec<_>>(), vec![Violation::BadInode]);
}

fn root_second_block(img: &[u8]) -> u32 {
    let io = MemImageIO::new(img);
    let meta = Xv6Meta::from_io(&io).unwrap();
    let root = InodeTable::new(&io, &meta).get(XV6_ROOTINO).unwrap();
    assert_ne!(root.addrs[1], 0);
    root.addrs[1]
}

#[test]
fn unusable_geometry_is_rejected() {
    let mut img = Xv6ImageBuilder::new().build();
    // nblocks > size
    let nblocks_off = XV6_BSIZE + 4;
    img[nblocks_off..nblocks_off + 4].copy_from_slice(&5000u32.to_le_bytes());

    let io = MemImageIO::new(&img);
    assert!(matches!(
        Xv6Meta::from_io(&io),
        Err(FsCheckerError::Geometry(_))
    ));
}

#[test]
fn image_loaded_from_disk() {
    use std::io::Write;

    let mut b = Xv6ImageBuilder::new();
    b.create_file(XV6_ROOTINO, "README", 3);
    let img = b.build();

    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(&img).unwrap();

    let io = FileImageIO::open(tmp.path()).unwrap();
    let meta = Xv6Meta::from_io(&io).unwrap();
    let rep = Xv6Checker::new(&io, &meta).check_all().unwrap();
    assert!(rep.ok());
}
