//! Built-in scenarios
//!
//! Both scenarios translate the same English paragraph into Arabic:
//!
//! - `sequential-fail` ("Local Attention"): each output token looks only at
//!   nearby input words, so the first "bat" becomes a sports bat (مضرب).
//! - `attention-context` ("Attention is all you need"): early output tokens
//!   already attend to "live" and "panic" at the end of the paragraph, so the
//!   first "bat" becomes the animal (خفاش).
//!
//! Weights are authored as sparse raw targets and normalized on construction.

use crate::dataset::{split_paragraph, Dataset, ExampleBuilder};

/// The fixed English input paragraph
pub const INPUT_PARAGRAPH: &str = "When I arrived at the station, I noticed a man holding a bat. No one around me reacted, so I assumed it was normal to carry one there. He remained completely still for a long time. It wasn\u{2019}t until the train arrived and the station grew brighter that people realized he was holding a live bat, only then did panic break out.";

/// Id of the local-attention scenario
pub const SEQUENTIAL_ID: &str = "sequential-fail";

/// Id of the global-attention scenario
pub const ATTENTION_ID: &str = "attention-context";

/// Input token positions in [`INPUT_PARAGRAPH`], suffixed by occurrence
#[allow(dead_code)]
mod idx {
    pub const WHEN: usize = 0;
    pub const I_1: usize = 1;
    pub const ARRIVED_1: usize = 2;
    pub const AT: usize = 3;
    pub const THE_1: usize = 4;
    pub const STATION_1: usize = 5;
    pub const I_2: usize = 6;
    pub const NOTICED: usize = 7;
    pub const A_1: usize = 8;
    pub const MAN: usize = 9;
    pub const HOLDING_1: usize = 10;
    pub const A_2: usize = 11;
    pub const BAT_1: usize = 12;
    pub const NO: usize = 13;
    pub const ONE: usize = 14;
    pub const AROUND: usize = 15;
    pub const ME: usize = 16;
    pub const REACTED: usize = 17;
    pub const SO: usize = 18;
    pub const I_3: usize = 19;
    pub const ASSUMED: usize = 20;
    pub const IT_1: usize = 21;
    pub const WAS_1: usize = 22;
    pub const NORMAL: usize = 23;
    pub const TO: usize = 24;
    pub const CARRY: usize = 25;
    pub const ONE_2: usize = 26;
    pub const THERE: usize = 27;
    pub const HE_1: usize = 28;
    pub const REMAINED: usize = 29;
    pub const COMPLETELY: usize = 30;
    pub const STILL: usize = 31;
    pub const FOR: usize = 32;
    pub const A_3: usize = 33;
    pub const LONG: usize = 34;
    pub const TIME: usize = 35;
    pub const IT_2: usize = 36;
    pub const WASNT: usize = 37;
    pub const UNTIL: usize = 38;
    pub const THE_2: usize = 39;
    pub const TRAIN: usize = 40;
    pub const ARRIVED_2: usize = 41;
    pub const AND: usize = 42;
    pub const THE_3: usize = 43;
    pub const STATION_2: usize = 44;
    pub const GREW: usize = 45;
    pub const BRIGHTER: usize = 46;
    pub const THAT: usize = 47;
    pub const PEOPLE: usize = 48;
    pub const REALIZED: usize = 49;
    pub const HE_2: usize = 50;
    pub const WAS_2: usize = 51;
    pub const HOLDING_2: usize = 52;
    pub const A_4: usize = 53;
    pub const LIVE: usize = 54;
    pub const BAT_2: usize = 55;
    pub const ONLY: usize = 56;
    pub const THEN: usize = 57;
    pub const DID: usize = 58;
    pub const PANIC: usize = 59;
    pub const BREAK: usize = 60;
    pub const OUT: usize = 61;
}

use idx::*;

const SEQUENTIAL_STEPS: &[(&str, &[(usize, f64)])] = &[
    ("عندما", &[(WHEN, 0.9), (I_1, 0.1)]),
    ("وصلتُ", &[(ARRIVED_1, 0.8), (I_1, 0.2)]),
    ("إلى", &[(AT, 0.7), (THE_1, 0.2), (STATION_1, 0.1)]),
    ("المحطة،", &[(STATION_1, 0.85), (AT, 0.1), (THE_1, 0.05)]),
    ("لاحظتُ", &[(NOTICED, 0.85), (I_2, 0.15)]),
    ("رجلًا", &[(MAN, 0.9), (A_1, 0.1)]),
    ("يحمل", &[(HOLDING_1, 0.8), (MAN, 0.1), (A_1, 0.1)]),
    ("مضربًا.", &[(BAT_1, 0.55), (HOLDING_1, 0.30), (MAN, 0.15)]),
    ("لم", &[(NO, 0.60), (ONE, 0.25), (REACTED, 0.15)]),
    ("يُبدِ", &[(REACTED, 0.70), (AROUND, 0.15), (ONE, 0.15)]),
    ("أي", &[(NO, 0.35), (ONE, 0.35), (AROUND, 0.30)]),
    ("شخص", &[(ONE, 0.70), (AROUND, 0.20), (ME, 0.10)]),
    ("من", &[(AROUND, 0.60), (ME, 0.25), (ONE, 0.15)]),
    ("حولي", &[(AROUND, 0.65), (ME, 0.35)]),
    ("ردّ", &[(REACTED, 0.80), (SO, 0.20)]),
    ("فعل،", &[(REACTED, 0.70), (SO, 0.20), (ASSUMED, 0.10)]),
    ("لذلك", &[(SO, 0.80), (I_3, 0.10), (ASSUMED, 0.10)]),
    ("افترضتُ", &[(ASSUMED, 0.85), (I_3, 0.15)]),
    ("أن", &[(IT_1, 0.35), (WAS_1, 0.35), (TO, 0.30)]),
    ("حمل", &[(CARRY, 0.60), (TO, 0.25), (ONE_2, 0.15)]),
    ("المضرب", &[(ONE_2, 0.30), (CARRY, 0.30), (BAT_1, 0.25), (HOLDING_1, 0.15)]),
    ("هناك", &[(THERE, 0.70), (CARRY, 0.20), (ONE_2, 0.10)]),
    ("أمرٌ", &[(WAS_1, 0.35), (NORMAL, 0.35), (IT_1, 0.30)]),
    ("طبيعي.", &[(NORMAL, 0.70), (WAS_1, 0.20), (IT_1, 0.10)]),
    ("بقي", &[(REMAINED, 0.80), (HE_1, 0.20)]),
    ("ثابتًا", &[(STILL, 0.70), (COMPLETELY, 0.20), (REMAINED, 0.10)]),
    ("دون", &[(COMPLETELY, 0.55), (STILL, 0.35), (FOR, 0.10)]),
    ("حراك", &[(STILL, 0.65), (COMPLETELY, 0.25), (TIME, 0.10)]),
    ("لفترة", &[(FOR, 0.70), (TIME, 0.30)]),
    ("طويلة", &[(LONG, 0.75), (TIME, 0.25)]),
    ("جدًا.", &[(LONG, 0.55), (TIME, 0.30), (A_3, 0.15)]),
    ("ولم", &[(IT_2, 0.45), (WASNT, 0.35), (UNTIL, 0.20)]),
    ("يدرك", &[(REALIZED, 0.75), (PEOPLE, 0.15), (THAT, 0.10)]),
    ("الناس", &[(PEOPLE, 0.80), (REALIZED, 0.20)]),
    ("أنه", &[(THAT, 0.60), (HE_2, 0.25), (WAS_2, 0.15)]),
    ("كان", &[(WAS_2, 0.70), (HE_2, 0.20), (HOLDING_2, 0.10)]),
    ("يحمل", &[(HOLDING_2, 0.75), (WAS_2, 0.15), (HE_2, 0.10)]),
    ("خفاشًا", &[(LIVE, 0.45), (BAT_2, 0.40), (HOLDING_2, 0.10), (REALIZED, 0.05)]),
    ("حيًا", &[(LIVE, 0.60), (BAT_2, 0.25), (HOLDING_2, 0.15)]),
    ("إلا", &[(UNTIL, 0.55), (THAT, 0.25), (ONLY, 0.20)]),
    ("بعد", &[(UNTIL, 0.60), (ARRIVED_2, 0.25), (TRAIN, 0.15)]),
    ("وصول", &[(ARRIVED_2, 0.75), (TRAIN, 0.15), (THE_2, 0.10)]),
    ("القطار", &[(TRAIN, 0.85), (ARRIVED_2, 0.15)]),
    ("وازدياد", &[(GREW, 0.60), (BRIGHTER, 0.30), (STATION_2, 0.10)]),
    ("إضاءة", &[(BRIGHTER, 0.70), (GREW, 0.20), (STATION_2, 0.10)]),
    ("المحطة،", &[(STATION_2, 0.65), (THE_3, 0.25), (GREW, 0.10)]),
    ("وعندها", &[(ONLY, 0.45), (THEN, 0.35), (DID, 0.20)]),
    ("فقط", &[(ONLY, 0.70), (THEN, 0.20), (DID, 0.10)]),
    ("بدأ", &[(BREAK, 0.55), (OUT, 0.25), (DID, 0.20)]),
    ("الذعر", &[(PANIC, 0.80), (DID, 0.10), (THEN, 0.10)]),
    ("ينتشر", &[(OUT, 0.50), (BREAK, 0.30), (PANIC, 0.20)]),
    ("وعمّ", &[(BREAK, 0.45), (OUT, 0.35), (PANIC, 0.20)]),
    ("الهلع.", &[(PANIC, 0.70), (BREAK, 0.20), (OUT, 0.10)]),
];

const ATTENTION_STEPS: &[(&str, &[(usize, f64)])] = &[
    ("عندما", &[(WHEN, 0.7), (IT_2, 0.08), (WASNT, 0.07), (UNTIL, 0.06), (ARRIVED_1, 0.05), (ARRIVED_2, 0.04)]),
    ("وصلتُ", &[(ARRIVED_1, 0.42), (I_1, 0.14), (WHEN, 0.10), (AT, 0.07), (STATION_1, 0.07), (TRAIN, 0.06), (ARRIVED_2, 0.06), (STATION_2, 0.04), (NOTICED, 0.04)]),
    ("إلى", &[(AT, 0.45), (STATION_1, 0.20), (THE_1, 0.12), (STATION_2, 0.08), (THE_3, 0.05), (ARRIVED_1, 0.05), (ARRIVED_2, 0.05)]),
    ("المحطة،", &[(STATION_1, 0.42), (STATION_2, 0.18), (THE_1, 0.10), (THE_3, 0.08), (AT, 0.07), (GREW, 0.06), (BRIGHTER, 0.05), (ARRIVED_2, 0.04)]),
    ("لاحظتُ", &[(NOTICED, 0.48), (I_2, 0.12), (I_1, 0.08), (I_3, 0.08), (ASSUMED, 0.08), (REACTED, 0.05), (MAN, 0.04), (HOLDING_1, 0.04), (REALIZED, 0.03)]),
    ("رجلًا", &[(MAN, 0.52), (A_1, 0.10), (HOLDING_1, 0.10), (HE_2, 0.08), (HOLDING_2, 0.08), (PEOPLE, 0.04), (REALIZED, 0.04), (BAT_1, 0.02), (BAT_2, 0.02)]),
    ("يحمل", &[(HOLDING_1, 0.36), (HOLDING_2, 0.16), (MAN, 0.10), (HE_2, 0.10), (BAT_1, 0.10), (BAT_2, 0.08), (LIVE, 0.06), (REALIZED, 0.04)]),
    ("خفاشًا.", &[(BAT_1, 0.18), (HOLDING_1, 0.12), (MAN, 0.08), (LIVE, 0.14), (BAT_2, 0.10), (HOLDING_2, 0.08), (REALIZED, 0.10), (BRIGHTER, 0.08), (PANIC, 0.06), (PEOPLE, 0.04), (STATION_2, 0.02)]),
    ("لم", &[(NO, 0.40), (REACTED, 0.18), (ONE, 0.14), (AROUND, 0.08), (ME, 0.08), (ASSUMED, 0.06), (NORMAL, 0.04), (PEOPLE, 0.02)]),
    ("يُبدِ", &[(REACTED, 0.45), (NO, 0.12), (ONE, 0.10), (AROUND, 0.10), (ME, 0.08), (ASSUMED, 0.06), (SO, 0.05), (NORMAL, 0.04)]),
    ("أي", &[(NO, 0.30), (ONE, 0.22), (AROUND, 0.15), (ME, 0.08), (REACTED, 0.08), (PEOPLE, 0.07), (REALIZED, 0.05), (PANIC, 0.05)]),
    ("شخص", &[(ONE, 0.38), (PEOPLE, 0.15), (AROUND, 0.15), (ME, 0.10), (REACTED, 0.10), (REALIZED, 0.06), (PANIC, 0.06)]),
    ("من", &[(AROUND, 0.35), (ME, 0.20), (STATION_1, 0.10), (THERE, 0.10), (PEOPLE, 0.08), (REACTED, 0.07), (TRAIN, 0.05), (STATION_2, 0.05)]),
    ("حولي", &[(AROUND, 0.45), (ME, 0.25), (I_3, 0.10), (ASSUMED, 0.08), (REACTED, 0.06), (NO, 0.06)]),
    ("ردّ", &[(REACTED, 0.40), (NO, 0.10), (SO, 0.12), (ASSUMED, 0.10), (ONE, 0.08), (AROUND, 0.08), (PEOPLE, 0.06), (REALIZED, 0.06)]),
    ("فعل،", &[(REACTED, 0.30), (SO, 0.18), (ASSUMED, 0.14), (NO, 0.10), (ONE, 0.08), (AROUND, 0.08), (PEOPLE, 0.06), (REALIZED, 0.06)]),
    ("فافترضتُ", &[(ASSUMED, 0.40), (I_3, 0.18), (I_2, 0.08), (I_1, 0.06), (SO, 0.10), (NORMAL, 0.08), (CARRY, 0.05), (THERE, 0.05)]),
    ("أن", &[(IT_1, 0.18), (WAS_1, 0.16), (NORMAL, 0.15), (TO, 0.12), (CARRY, 0.10), (ONE_2, 0.08), (THERE, 0.08), (ASSUMED, 0.07), (IT_2, 0.06)]),
    ("الأمر", &[(NORMAL, 0.22), (IT_1, 0.14), (WAS_1, 0.12), (ASSUMED, 0.14), (NO, 0.10), (REACTED, 0.10), (CARRY, 0.08), (THERE, 0.06), (PEOPLE, 0.04)]),
    ("عاديّ", &[(NORMAL, 0.30), (NO, 0.14), (REACTED, 0.12), (ASSUMED, 0.12), (ONE, 0.08), (AROUND, 0.08), (CARRY, 0.08), (THERE, 0.06), (PANIC, 0.02)]),
    ("ومن", &[(SO, 0.22), (NORMAL, 0.18), (TO, 0.10), (CARRY, 0.16), (ONE_2, 0.10), (THERE, 0.12), (ASSUMED, 0.06), (AROUND, 0.06)]),
    ("الطبيعي", &[(NORMAL, 0.28), (CARRY, 0.18), (THERE, 0.12), (ONE_2, 0.10), (ASSUMED, 0.10), (NO, 0.08), (REACTED, 0.06), (STATION_1, 0.04), (STATION_2, 0.04)]),
    ("أن", &[(TO, 0.32), (CARRY, 0.22), (ONE_2, 0.14), (IT_1, 0.10), (WAS_1, 0.08), (THERE, 0.08), (ASSUMED, 0.06)]),
    ("يحمل", &[(CARRY, 0.30), (HOLDING_1, 0.12), (HOLDING_2, 0.10), (ONE_2, 0.14), (BAT_1, 0.08), (BAT_2, 0.08), (LIVE, 0.06), (THERE, 0.06), (ASSUMED, 0.06)]),
    ("شيئًا", &[(ONE_2, 0.22), (BAT_1, 0.10), (BAT_2, 0.08), (CARRY, 0.18), (HOLDING_1, 0.10), (HOLDING_2, 0.08), (LIVE, 0.08), (THERE, 0.08), (NORMAL, 0.08)]),
    ("كهذا", &[(BAT_1, 0.18), (BAT_2, 0.10), (CARRY, 0.16), (HOLDING_1, 0.12), (HOLDING_2, 0.10), (LIVE, 0.08), (NORMAL, 0.10), (THERE, 0.08), (ASSUMED, 0.08)]),
    ("هناك.", &[(THERE, 0.50), (STATION_1, 0.12), (STATION_2, 0.08), (CARRY, 0.10), (NORMAL, 0.08), (AROUND, 0.06), (TRAIN, 0.04), (ARRIVED_2, 0.02)]),
    ("بقي", &[(HE_1, 0.18), (REMAINED, 0.42), (STILL, 0.10), (COMPLETELY, 0.08), (FOR, 0.06), (LONG, 0.06), (TIME, 0.06), (HOLDING_2, 0.02), (REALIZED, 0.02)]),
    ("ثابتًا", &[(STILL, 0.34), (COMPLETELY, 0.18), (REMAINED, 0.18), (HE_1, 0.08), (LONG, 0.08), (TIME, 0.06), (HOLDING_2, 0.04), (BAT_2, 0.02), (LIVE, 0.02)]),
    ("دون", &[(COMPLETELY, 0.28), (STILL, 0.22), (REMAINED, 0.14), (FOR, 0.14), (LONG, 0.10), (TIME, 0.08), (HE_1, 0.04)]),
    ("حراك", &[(STILL, 0.30), (COMPLETELY, 0.18), (LONG, 0.16), (TIME, 0.14), (REMAINED, 0.10), (FOR, 0.08), (HE_1, 0.04)]),
    ("لفترة", &[(FOR, 0.30), (LONG, 0.22), (TIME, 0.22), (REMAINED, 0.10), (STILL, 0.08), (COMPLETELY, 0.04), (UNTIL, 0.04)]),
    ("طويلة", &[(LONG, 0.38), (TIME, 0.22), (FOR, 0.16), (REMAINED, 0.10), (STILL, 0.08), (COMPLETELY, 0.06)]),
    ("جدًا.", &[(LONG, 0.26), (TIME, 0.24), (COMPLETELY, 0.14), (STILL, 0.12), (REMAINED, 0.10), (PANIC, 0.06), (BRIGHTER, 0.04), (LIVE, 0.04)]),
    ("ولم", &[(IT_2, 0.38), (WASNT, 0.22), (UNTIL, 0.18), (REALIZED, 0.10), (PEOPLE, 0.06), (ARRIVED_2, 0.03), (TRAIN, 0.03)]),
    ("يدرك", &[(REALIZED, 0.45), (PEOPLE, 0.18), (THAT, 0.10), (HE_2, 0.08), (HOLDING_2, 0.06), (LIVE, 0.05), (BAT_2, 0.04), (PANIC, 0.04)]),
    ("الناس", &[(PEOPLE, 0.48), (REALIZED, 0.22), (PANIC, 0.10), (NO, 0.06), (ONE, 0.04), (AROUND, 0.04), (BRIGHTER, 0.03), (TRAIN, 0.03)]),
    ("أنه", &[(THAT, 0.34), (HE_2, 0.20), (WAS_2, 0.16), (HOLDING_2, 0.10), (REALIZED, 0.08), (LIVE, 0.06), (BAT_2, 0.06)]),
    ("كان", &[(WAS_2, 0.36), (HE_2, 0.16), (HOLDING_2, 1.14), (REALIZED, 0.10), (LIVE, 0.08), (BAT_2, 0.08), (WAS_1, 0.06), (IT_1, 0.02)]),
    ("خفاشًا", &[(BAT_2, 0.18), (LIVE, 0.16), (HOLDING_2, 0.14), (REALIZED, 0.12), (PANIC, 0.10), (BRIGHTER, 0.08), (BAT_1, 0.10), (HOLDING_1, 0.06), (MAN, 0.04), (PEOPLE, 0.02)]),
    ("حيًا", &[(LIVE, 0.40), (BAT_2, 0.18), (HOLDING_2, 0.12), (REALIZED, 0.10), (PANIC, 0.08), (BRIGHTER, 0.06), (BAT_1, 0.04), (HOLDING_1, 0.02)]),
    ("إلا", &[(UNTIL, 0.46), (ONLY, 0.18), (THEN, 0.12), (REALIZED, 0.10), (ARRIVED_2, 0.08), (TRAIN, 0.06)]),
    ("بعد", &[(UNTIL, 0.30), (TRAIN, 0.18), (ARRIVED_2, 0.18), (BRIGHTER, 0.10), (STATION_2, 0.08), (REALIZED, 0.08), (PEOPLE, 0.08)]),
    ("وصول", &[(ARRIVED_2, 0.34), (TRAIN, 0.22), (THE_2, 0.10), (STATION_2, 0.10), (BRIGHTER, 0.08), (REALIZED, 0.08), (UNTIL, 0.08)]),
    ("القطار", &[(TRAIN, 0.52), (ARRIVED_2, 0.18), (STATION_2, 0.10), (BRIGHTER, 0.08), (PEOPLE, 0.06), (PANIC, 0.06)]),
    ("وازدياد", &[(GREW, 0.30), (BRIGHTER, 0.22), (STATION_2, 0.16), (PEOPLE, 0.08), (REALIZED, 0.08), (TRAIN, 0.08), (ARRIVED_2, 0.08)]),
    ("إضاءة", &[(BRIGHTER, 0.40), (GREW, 0.18), (STATION_2, 0.16), (PEOPLE, 0.08), (REALIZED, 0.08), (PANIC, 0.06), (TRAIN, 0.04)]),
    ("المحطة،", &[(STATION_2, 0.36), (GREW, 0.16), (BRIGHTER, 0.14), (THE_3, 0.10), (STATION_1, 0.08), (ARRIVED_1, 0.06), (TRAIN, 0.06), (ARRIVED_2, 0.04)]),
    ("وعندها", &[(ONLY, 0.26), (THEN, 0.22), (DID, 0.16), (PANIC, 0.12), (REALIZED, 0.10), (BRIGHTER, 0.08), (LIVE, 0.06)]),
    ("فقط", &[(ONLY, 0.44), (THEN, 0.18), (DID, 0.12), (PANIC, 0.12), (REALIZED, 0.08), (BREAK, 0.06)]),
    ("بدأ", &[(PANIC, 0.22), (BREAK, 0.26), (OUT, 0.18), (DID, 0.14), (ONLY, 0.10), (THEN, 0.10)]),
    ("الذعر", &[(PANIC, 0.55), (ONLY, 0.10), (THEN, 0.08), (DID, 0.07), (LIVE, 0.07), (BAT_2, 0.05), (REALIZED, 0.05), (BRIGHTER, 0.03)]),
    ("ينتشر", &[(BREAK, 0.28), (OUT, 0.24), (PANIC, 0.18), (PEOPLE, 0.10), (REALIZED, 0.10), (ONLY, 0.05), (THEN, 0.05)]),
    ("وعمّ", &[(OUT, 0.26), (BREAK, 0.22), (PANIC, 0.20), (PEOPLE, 0.12), (REALIZED, 0.10), (BRIGHTER, 0.05), (TRAIN, 0.05)]),
    ("الهلع.", &[(PANIC, 0.50), (BREAK, 0.20), (OUT, 0.15), (PEOPLE, 0.07), (REALIZED, 0.05), (BRIGHTER, 0.03)]),
];

/// Build the built-in dataset
pub fn dataset() -> Dataset {
    Dataset::from_builders(vec![
        scenario(SEQUENTIAL_ID, "Local Attention", SEQUENTIAL_STEPS),
        scenario(ATTENTION_ID, "Attention is all you need", ATTENTION_STEPS),
    ])
}

fn scenario(id: &str, name: &str, steps: &[(&str, &[(usize, f64)])]) -> ExampleBuilder {
    steps.iter().fold(
        ExampleBuilder::new(id, name, split_paragraph(INPUT_PARAGRAPH)),
        |builder, (token, targets)| builder.sparse_step(*token, targets),
    )
}
