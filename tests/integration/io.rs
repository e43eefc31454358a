//! Input, host services and the token dump.

#![cfg(test)]

use crate::common::*;

use phooey::*;
use std::time::Duration;

mod input {
    use super::*;

    #[test]
    fn echo_until_end_of_input() {
        let source = "&: [_1 $c &: ]_1";
        assert_eq!(output_with_input(source, "abc\n"), "abc\n");
        assert_eq!(output_with_input(source, ""), "");
    }

    #[test]
    fn sum_of_integers() {
        // First number is the count.
        let source = "&. [0 > +. < -1 ]0 > $i";
        assert_eq!(output_with_input(source, "3 10 20 30"), "60");
        assert_eq!(output_with_input(source, "0"), "0");
    }

    #[test]
    fn unparseable_integer_reads_zero() {
        assert_eq!(output_with_input("&. $i \" \" &. $i", "-5 abc"), "-5 0");
    }

    #[test]
    fn count_bytes_with_input_check() {
        let source = "~i [0 > +1 > &: < < ~i ]0 > $i";
        assert_eq!(output_with_input(source, "abc"), "3");
        assert_eq!(output_with_input(source, ""), "0");
    }
}

mod host {
    use super::*;

    #[test]
    fn sleeps_are_delegated() {
        let mut e = engine("#3 ~s1500", "", EngineConfig::default(), RecordingHost::new(0));
        e.run().unwrap();
        assert_eq!(e.host().sleeps, vec![Duration::from_secs(3), Duration::from_millis(1500)]);
        assert_eq!(e.host().total_slept(), Duration::from_millis(4500));
    }

    #[test]
    fn clock_reads() {
        let host = RecordingHost::new(0).with_clock(1_234);
        let mut e = engine("~t $i \" \" &0 ~T & $i", "", EngineConfig::default(), host);
        e.run().unwrap();
        assert_eq!(e.output(), b"1234 1234");
    }

    #[test]
    fn random_is_reproducible_per_seed() {
        let source = "~?1000 $i \" \" ~?1000 $i";
        let run_seeded = |seed| {
            let mut e = engine(source, "", EngineConfig::default(), RecordingHost::new(seed));
            e.run().unwrap();
            String::from_utf8(e.into_output()).unwrap()
        };
        let first = run_seeded(11);
        assert_eq!(first, run_seeded(11));
        for part in first.split(' ') {
            let value: i64 = part.parse().unwrap();
            assert!((0..=1000).contains(&value));
        }
    }

    #[test]
    fn random_range_accepts_reversed_bounds() {
        for seed in 0..20 {
            let mut e = engine("&10 ~r2", "", EngineConfig::default(), RecordingHost::new(seed));
            e.run().unwrap();
            assert!((2..=10).contains(&e.tape().current()));
        }
    }
}

mod tokens {
    use super::*;

    #[test]
    fn token_dump_format() {
        let dump: Vec<String> = tokenize("&42 $i \"x\" +! ]")
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            dump,
            vec![
                "Instruction(`&42`, 42)",
                "Instruction(`$i`, {})",
                "Instruction(`\"x\"`, {})",
                "Instruction(`+!`, PopStackOnce)",
                "Instruction(`]`, {})",
            ]
        );
    }
}
