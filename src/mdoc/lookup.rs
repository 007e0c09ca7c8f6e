//! Abbreviation resolvers
//!
//! Several macros take an abbreviation that renderers expand: `St -p1003.1`,
//! `At v7`, `Lb libc`, and the section, volume and architecture words of
//! `Dt`. The validator resolves them through the [`Resolver`] trait so that
//! embedders can supply their own tables; [`StandardResolver`] ships the
//! common ones.

use once_cell::sync::Lazy;
use std::collections::HashMap;

pub trait Resolver {
    fn library(&self, name: &str) -> Option<&str>;
    fn att(&self, version: &str) -> Option<&str>;
    fn standard(&self, name: &str) -> Option<&str>;
    fn manual_section(&self, section: &str) -> Option<&str>;
    fn volume(&self, volume: &str) -> Option<&str>;
    fn arch(&self, arch: &str) -> Option<&str>;
}

type Table = Lazy<HashMap<&'static str, &'static str>>;

static LIBRARIES: Table = Lazy::new(|| {
    HashMap::from([
        ("libarchive", "Reading and Writing Streaming Archives Library (libarchive, \\-larchive)"),
        ("libc", "Standard C\\~Library (libc, \\-lc)"),
        ("libcrypto", "Crypto Library (libcrypto, \\-lcrypto)"),
        ("libcurses", "Curses Library (libcurses, \\-lcurses)"),
        ("libedit", "Command Line Editor Library (libedit, \\-ledit)"),
        ("libevent", "Event Notification Library (libevent, \\-levent)"),
        ("libexpat", "Expat XML parser library (libexpat, \\-lexpat)"),
        ("libkvm", "Kernel Data Access Library (libkvm, \\-lkvm)"),
        ("libm", "Math Library (libm, \\-lm)"),
        ("libpcap", "Packet Capture Library (libpcap, \\-lpcap)"),
        ("libpthread", "POSIX Threads Library (libpthread, \\-lpthread)"),
        ("librpcsvc", "RPC Service Library (librpcsvc, \\-lrpcsvc)"),
        ("libssl", "SSL/TLS Library (libssl, \\-lssl)"),
        ("libusbhid", "USB Human Interface Devices Library (libusbhid, \\-lusbhid)"),
        ("libutil", "System Utilities Library (libutil, \\-lutil)"),
        ("libz", "Compression Library (libz, \\-lz)"),
    ])
});

static ATT_VERSIONS: Table = Lazy::new(|| {
    HashMap::from([
        ("v1", "Version\\~1 AT&T UNIX"),
        ("v2", "Version\\~2 AT&T UNIX"),
        ("v3", "Version\\~3 AT&T UNIX"),
        ("v4", "Version\\~4 AT&T UNIX"),
        ("v5", "Version\\~5 AT&T UNIX"),
        ("v6", "Version\\~6 AT&T UNIX"),
        ("v7", "Version\\~7 AT&T UNIX"),
        ("32v", "Version\\~32V AT&T UNIX"),
        ("III", "AT&T System\\~III UNIX"),
        ("V", "AT&T System\\~V UNIX"),
        ("V.1", "AT&T System\\~V Release\\~1 UNIX"),
        ("V.2", "AT&T System\\~V Release\\~2 UNIX"),
        ("V.3", "AT&T System\\~V Release\\~3 UNIX"),
        ("V.4", "AT&T System\\~V Release\\~4 UNIX"),
    ])
});

static STANDARDS: Table = Lazy::new(|| {
    HashMap::from([
        ("-p1003.1-88", "IEEE Std 1003.1-1988 (\\(lqPOSIX.1\\(rq)"),
        ("-p1003.1-90", "IEEE Std 1003.1-1990 (\\(lqPOSIX.1\\(rq)"),
        ("-p1003.1-96", "ISO/IEC 9945-1:1996 (\\(lqPOSIX.1\\(rq)"),
        ("-p1003.1-2001", "IEEE Std 1003.1-2001 (\\(lqPOSIX.1\\(rq)"),
        ("-p1003.1-2004", "IEEE Std 1003.1-2004 (\\(lqPOSIX.1\\(rq)"),
        ("-p1003.1-2008", "IEEE Std 1003.1-2008 (\\(lqPOSIX.1\\(rq)"),
        ("-p1003.1", "IEEE Std 1003.1 (\\(lqPOSIX.1\\(rq)"),
        ("-p1003.1b", "IEEE Std 1003.1b (\\(lqPOSIX.1b\\(rq)"),
        ("-p1003.1b-93", "IEEE Std 1003.1b-1993 (\\(lqPOSIX.1b\\(rq)"),
        ("-p1003.1c-95", "IEEE Std 1003.1c-1995 (\\(lqPOSIX.1c\\(rq)"),
        ("-p1003.1g-2000", "IEEE Std 1003.1g-2000 (\\(lqPOSIX.1g\\(rq)"),
        ("-p1003.1i-95", "IEEE Std 1003.1i-1995 (\\(lqPOSIX.1i\\(rq)"),
        ("-p1003.2", "IEEE Std 1003.2 (\\(lqPOSIX.2\\(rq)"),
        ("-p1003.2-92", "IEEE Std 1003.2-1992 (\\(lqPOSIX.2\\(rq)"),
        ("-p1003.2a-92", "IEEE Std 1003.2a-1992 (\\(lqPOSIX.2\\(rq)"),
        ("-isoC", "ISO/IEC 9899:1990 (\\(lqISO\\~C90\\(rq)"),
        ("-isoC-90", "ISO/IEC 9899:1990 (\\(lqISO\\~C90\\(rq)"),
        ("-isoC-amd1", "ISO/IEC 9899/AMD1:1995 (\\(lqISO\\~C90, Amendment 1\\(rq)"),
        ("-isoC-99", "ISO/IEC 9899:1999 (\\(lqISO\\~C99\\(rq)"),
        ("-isoC-2011", "ISO/IEC 9899:2011 (\\(lqISO\\~C11\\(rq)"),
        ("-ansiC", "ANSI X3.159-1989 (\\(lqANSI\\~C89\\(rq)"),
        ("-ansiC-89", "ANSI X3.159-1989 (\\(lqANSI\\~C89\\(rq)"),
        ("-ieee754", "IEEE Std 754-1985"),
        ("-iso8802-3", "ISO 8802-3: 1989"),
        ("-iso8601", "ISO 8601"),
        ("-svid4", "System\\~V Interface Definition, Fourth Edition (\\(lqSVID4\\(rq)"),
        ("-susv1", "Version\\~1 of the Single UNIX Specification (\\(lqSUSv1\\(rq)"),
        ("-susv2", "Version\\~2 of the Single UNIX Specification (\\(lqSUSv2\\(rq)"),
        ("-susv3", "Version\\~3 of the Single UNIX Specification (\\(lqSUSv3\\(rq)"),
        ("-susv4", "Version\\~4 of the Single UNIX Specification (\\(lqSUSv4\\(rq)"),
        ("-xpg3", "X/Open Portability Guide Issue\\~3 (\\(lqXPG3\\(rq)"),
        ("-xpg4", "X/Open Portability Guide Issue\\~4 (\\(lqXPG4\\(rq)"),
        ("-xpg4.2", "X/Open Portability Guide Issue\\~4, Version\\~2 (\\(lqXPG4.2\\(rq)"),
        ("-xbd5", "X/Open Base Definitions Issue\\~5 (\\(lqXBD5\\(rq)"),
        ("-xcu5", "X/Open Commands and Utilities Issue\\~5 (\\(lqXCU5\\(rq)"),
        ("-xsh5", "X/Open System Interfaces and Headers Issue\\~5 (\\(lqXSH5\\(rq)"),
        ("-xns5", "X/Open Networking Services Issue\\~5 (\\(lqXNS5\\(rq)"),
    ])
});

static MANUAL_SECTIONS: Table = Lazy::new(|| {
    HashMap::from([
        ("1", "General Commands Manual"),
        ("2", "System Calls Manual"),
        ("3", "Library Functions Manual"),
        ("3p", "Perl Library Functions Manual"),
        ("4", "Device Drivers Manual"),
        ("5", "File Formats Manual"),
        ("6", "Games Manual"),
        ("7", "Miscellaneous Information Manual"),
        ("8", "System Manager's Manual"),
        ("9", "Kernel Developer's Manual"),
        ("X11", "X11 Developer's Manual"),
        ("X11R6", "X11 Developer's Manual"),
        ("unass", "Unassociated"),
        ("local", "Local"),
        ("draft", "Draft"),
        ("paper", "Paper"),
    ])
});

static VOLUMES: Table = Lazy::new(|| {
    HashMap::from([
        ("USD", "User's Supplementary Documents"),
        ("PS1", "Programmer's Supplementary Documents"),
        ("AMD", "Ancestral Manual Documents"),
        ("SMM", "System Manager's Manual"),
        ("URM", "Reference Manual"),
        ("PRM", "Programmer's Manual"),
        ("KM", "Kernel Manual"),
        ("IND", "Manual Master Index"),
        ("LOCAL", "Local Manual"),
        ("CON", "Contributed Software Manual"),
    ])
});

static ARCHITECTURES: Table = Lazy::new(|| {
    HashMap::from([
        ("alpha", "Alpha"),
        ("amd64", "AMD64"),
        ("amiga", "Amiga"),
        ("arc", "ARC"),
        ("arm", "ARM"),
        ("armish", "ARMISH"),
        ("armv7", "ARMv7"),
        ("aviion", "AViiON"),
        ("hp300", "HP300"),
        ("hppa", "HPPA"),
        ("hppa64", "HPPA64"),
        ("i386", "i386"),
        ("landisk", "LANDISK"),
        ("loongson", "Loongson"),
        ("luna88k", "Luna88k"),
        ("mac68k", "Mac68k"),
        ("macppc", "MacPPC"),
        ("mips64", "MIPS64"),
        ("mvme68k", "MVME68k"),
        ("mvme88k", "MVME88k"),
        ("mvmeppc", "MVMEPPC"),
        ("octeon", "OCTEON"),
        ("pmax", "PMAX"),
        ("sgi", "SGI"),
        ("socppc", "SOCPPC"),
        ("sparc", "SPARC"),
        ("sparc64", "SPARC64"),
        ("sun3", "Sun3"),
        ("vax", "VAX"),
        ("zaurus", "Zaurus"),
    ])
});

/// Resolver backed by the built-in tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardResolver;

impl Resolver for StandardResolver {
    fn library(&self, name: &str) -> Option<&str> {
        LIBRARIES.get(name).copied()
    }

    fn att(&self, version: &str) -> Option<&str> {
        ATT_VERSIONS.get(version).copied()
    }

    fn standard(&self, name: &str) -> Option<&str> {
        STANDARDS.get(name).copied()
    }

    fn manual_section(&self, section: &str) -> Option<&str> {
        MANUAL_SECTIONS.get(section).copied()
    }

    fn volume(&self, volume: &str) -> Option<&str> {
        VOLUMES.get(volume).copied()
    }

    fn arch(&self, arch: &str) -> Option<&str> {
        ARCHITECTURES.get(arch).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", Some("General Commands Manual"))]
    #[case("3p", Some("Perl Library Functions Manual"))]
    #[case("9", Some("Kernel Developer's Manual"))]
    #[case("10", None)]
    fn test_manual_sections(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(StandardResolver.manual_section(input), expected);
    }

    #[test]
    fn test_standards() {
        assert_eq!(
            StandardResolver.standard("-ansiC"),
            Some("ANSI X3.159-1989 (\\(lqANSI\\~C89\\(rq)")
        );
        assert_eq!(StandardResolver.standard("-posix"), None);
    }

    #[test]
    fn test_att_and_arch() {
        assert_eq!(StandardResolver.att("v7"), Some("Version\\~7 AT&T UNIX"));
        assert_eq!(StandardResolver.att("v8"), None);
        assert_eq!(StandardResolver.arch("amd64"), Some("AMD64"));
        assert_eq!(StandardResolver.volume("USD"), Some("User's Supplementary Documents"));
        assert_eq!(StandardResolver.library("libz"), Some("Compression Library (libz, \\-lz)"));
    }
}
