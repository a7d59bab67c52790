//! Double Metaphone phonetic encoding
//!
//! Encodes a word into a primary and an optional alternate pronunciation
//! code, each at most [`MAX_CODE_LEN`] characters. Spelling variants of the
//! same name ("Smith", "Smyth", "Schmidt") tend to share at least one code.

/// Maximum length of a phonetic code
pub const MAX_CODE_LEN: usize = 4;

/// Primary and alternate phonetic codes of a word
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PhoneticCode {
    pub primary: String,
    /// `None` when the alternate pronunciation encodes the same as the primary
    pub alternate: Option<String>,
}

impl PhoneticCode {
    /// Non-empty codes, primary first
    pub fn codes(self) -> impl Iterator<Item = String> {
        std::iter::once(self.primary)
            .chain(self.alternate)
            .filter(|code| !code.is_empty())
    }
}

/// Encode a word with the Double Metaphone algorithm
pub fn double_metaphone(input: &str) -> PhoneticCode {
    let mut encoder = Encoder::new(input);
    encoder.encode();
    encoder.finish()
}

struct Encoder {
    word: Vec<char>,
    primary: String,
    alternate: String,
    current: usize,
    slavo_germanic: bool,
}

impl Encoder {
    fn new(input: &str) -> Self {
        let word: Vec<char> = input.trim().to_uppercase().chars().collect();
        let upper: String = word.iter().collect();
        let slavo_germanic = upper.contains('W')
            || upper.contains('K')
            || upper.contains("CZ")
            || upper.contains("WITZ");
        Self {
            word,
            primary: String::new(),
            alternate: String::new(),
            current: 0,
            slavo_germanic,
        }
    }

    fn finish(self) -> PhoneticCode {
        let primary: String = self.primary.chars().take(MAX_CODE_LEN).collect();
        let alternate: String = self.alternate.chars().take(MAX_CODE_LEN).collect();
        let alternate = if alternate == primary {
            None
        } else {
            Some(alternate)
        };
        PhoneticCode { primary, alternate }
    }

    fn len(&self) -> usize {
        self.word.len()
    }

    fn last(&self) -> usize {
        self.word.len().saturating_sub(1)
    }

    /// Character at an offset from the current position, `'\0'` outside the word
    fn at(&self, pos: isize) -> char {
        if pos < 0 {
            return '\0';
        }
        self.word.get(pos as usize).copied().unwrap_or('\0')
    }

    fn rel(&self, offset: isize) -> char {
        self.at(self.current as isize + offset)
    }

    /// True when the `len` characters starting at `start` equal one of `options`
    fn matches_at(&self, start: isize, len: usize, options: &[&str]) -> bool {
        if start < 0 || start as usize + len > self.word.len() {
            return false;
        }
        let start = start as usize;
        let slice: String = self.word[start..start + len].iter().collect();
        options.iter().any(|option| *option == slice)
    }

    fn matches_rel(&self, offset: isize, len: usize, options: &[&str]) -> bool {
        self.matches_at(self.current as isize + offset, len, options)
    }

    fn is_vowel_at(&self, pos: isize) -> bool {
        matches!(self.at(pos), 'A' | 'E' | 'I' | 'O' | 'U' | 'Y')
    }

    fn is_vowel_rel(&self, offset: isize) -> bool {
        self.is_vowel_at(self.current as isize + offset)
    }

    fn add(&mut self, code: &str) {
        self.primary.push_str(code);
        self.alternate.push_str(code);
    }

    fn add2(&mut self, primary: &str, alternate: &str) {
        self.primary.push_str(primary);
        self.alternate.push_str(alternate);
    }

    fn done(&self) -> bool {
        self.current >= self.len()
            || (self.primary.len() >= MAX_CODE_LEN && self.alternate.len() >= MAX_CODE_LEN)
    }

    fn is_germanic_prefix(&self) -> bool {
        self.matches_at(0, 4, &["VAN ", "VON "]) || self.matches_at(0, 3, &["SCH"])
    }

    fn encode(&mut self) {
        if self.word.is_empty() {
            return;
        }

        if self.matches_at(0, 2, &["GN", "KN", "PN", "WR", "PS"]) {
            self.current = 1;
        }

        if self.at(0) == 'X' {
            self.add("S");
            self.current = 1;
        }

        while !self.done() {
            let c = self.rel(0);
            let step = match c {
                'A' | 'E' | 'I' | 'O' | 'U' | 'Y' => {
                    if self.current == 0 {
                        self.add("A");
                    }
                    1
                }
                'B' => {
                    self.add("P");
                    if self.rel(1) == 'B' { 2 } else { 1 }
                }
                'Ç' => {
                    self.add("S");
                    1
                }
                'C' => self.encode_c(),
                'D' => self.encode_d(),
                'F' => {
                    self.add("F");
                    if self.rel(1) == 'F' { 2 } else { 1 }
                }
                'G' => self.encode_g(),
                'H' => {
                    if (self.current == 0 || self.is_vowel_rel(-1)) && self.is_vowel_rel(1) {
                        self.add("H");
                        2
                    } else {
                        1
                    }
                }
                'J' => self.encode_j(),
                'K' => {
                    self.add("K");
                    if self.rel(1) == 'K' { 2 } else { 1 }
                }
                'L' => self.encode_l(),
                'M' => {
                    self.add("M");
                    let umb = self.matches_rel(-1, 3, &["UMB"])
                        && (self.current + 1 == self.last() || self.matches_rel(2, 2, &["ER"]));
                    if umb || self.rel(1) == 'M' { 2 } else { 1 }
                }
                'N' => {
                    self.add("N");
                    if self.rel(1) == 'N' { 2 } else { 1 }
                }
                'Ñ' => {
                    self.add("N");
                    1
                }
                'P' => {
                    if self.rel(1) == 'H' {
                        self.add("F");
                        2
                    } else {
                        self.add("P");
                        if matches!(self.rel(1), 'P' | 'B') { 2 } else { 1 }
                    }
                }
                'Q' => {
                    self.add("K");
                    if self.rel(1) == 'Q' { 2 } else { 1 }
                }
                'R' => {
                    if self.current == self.last()
                        && !self.slavo_germanic
                        && self.matches_rel(-2, 2, &["IE"])
                        && !self.matches_rel(-4, 2, &["ME", "MA"])
                    {
                        self.add2("", "R");
                    } else {
                        self.add("R");
                    }
                    if self.rel(1) == 'R' { 2 } else { 1 }
                }
                'S' => self.encode_s(),
                'T' => self.encode_t(),
                'V' => {
                    self.add("F");
                    if self.rel(1) == 'V' { 2 } else { 1 }
                }
                'W' => self.encode_w(),
                'X' => {
                    let silent = self.current == self.last()
                        && (self.matches_rel(-3, 3, &["IAU", "EAU"])
                            || self.matches_rel(-2, 2, &["AU", "OU"]));
                    if !silent {
                        self.add("KS");
                    }
                    if matches!(self.rel(1), 'C' | 'X') { 2 } else { 1 }
                }
                'Z' => self.encode_z(),
                _ => 1,
            };
            self.current += step;
        }
    }

    fn encode_c(&mut self) -> usize {
        // "ACH" as in "bacharach", but not "macher"
        if self.current > 1
            && !self.is_vowel_rel(-2)
            && self.matches_rel(-1, 3, &["ACH"])
            && self.rel(2) != 'I'
            && (self.rel(2) != 'E' || self.matches_rel(-2, 6, &["BACHER", "MACHER"]))
        {
            self.add("K");
            return 2;
        }

        if self.current == 0 && self.matches_rel(0, 6, &["CAESAR"]) {
            self.add("S");
            return 2;
        }

        if self.matches_rel(0, 4, &["CHIA"]) {
            self.add("K");
            return 2;
        }

        if self.matches_rel(0, 2, &["CH"]) {
            if self.current > 0 && self.matches_rel(0, 4, &["CHAE"]) {
                self.add2("K", "X");
                return 2;
            }

            if self.current == 0
                && (self.matches_rel(1, 5, &["HARAC", "HARIS"])
                    || self.matches_rel(1, 3, &["HOR", "HYM", "HIA", "HEM"]))
                && !self.matches_at(0, 5, &["CHORE"])
            {
                self.add("K");
                return 2;
            }

            let germanic = self.is_germanic_prefix()
                || self.matches_rel(-2, 6, &["ORCHES", "ARCHIT", "ORCHID"])
                || self.matches_rel(2, 1, &["T", "S"])
                || ((self.matches_rel(-1, 1, &["A", "O", "U", "E"]) || self.current == 0)
                    && self.matches_rel(2, 1, &["L", "R", "N", "M", "B", "H", "F", "V", "W", " "]));

            if germanic {
                self.add("K");
            } else if self.current > 0 {
                if self.matches_at(0, 2, &["MC"]) {
                    self.add("K");
                } else {
                    self.add2("X", "K");
                }
            } else {
                self.add("X");
            }
            return 2;
        }

        if self.matches_rel(0, 2, &["CZ"]) && !self.matches_rel(-2, 4, &["WICZ"]) {
            self.add2("S", "X");
            return 2;
        }

        if self.matches_rel(1, 3, &["CIA"]) {
            self.add("X");
            return 3;
        }

        if self.matches_rel(0, 2, &["CC"]) && !(self.current == 1 && self.at(0) == 'M') {
            if self.matches_rel(2, 1, &["I", "E", "H"]) && !self.matches_rel(2, 2, &["HU"]) {
                if (self.current == 1 && self.rel(-1) == 'A')
                    || self.matches_rel(-1, 5, &["UCCEE", "UCCES"])
                {
                    self.add("KS");
                } else {
                    self.add("X");
                }
                return 3;
            }
            self.add("K");
            return 2;
        }

        if self.matches_rel(0, 2, &["CK", "CG", "CQ"]) {
            self.add("K");
            return 2;
        }

        if self.matches_rel(0, 2, &["CI", "CE", "CY"]) {
            if self.matches_rel(0, 3, &["CIO", "CIE", "CIA"]) {
                self.add2("S", "X");
            } else {
                self.add("S");
            }
            return 2;
        }

        self.add("K");
        if self.matches_rel(1, 2, &[" C", " Q", " G"]) {
            3
        } else if self.matches_rel(1, 1, &["C", "K", "Q"]) && !self.matches_rel(1, 2, &["CE", "CI"])
        {
            2
        } else {
            1
        }
    }

    fn encode_d(&mut self) -> usize {
        if self.matches_rel(0, 2, &["DG"]) {
            if self.matches_rel(2, 1, &["I", "E", "Y"]) {
                self.add("J");
                return 3;
            }
            self.add("TK");
            return 2;
        }

        self.add("T");
        if self.matches_rel(0, 2, &["DT", "DD"]) { 2 } else { 1 }
    }

    fn encode_g(&mut self) -> usize {
        if self.rel(1) == 'H' {
            if self.current > 0 && !self.is_vowel_rel(-1) {
                self.add("K");
                return 2;
            }

            if self.current == 0 {
                if self.rel(2) == 'I' {
                    self.add("J");
                } else {
                    self.add("K");
                }
                return 2;
            }

            // silent as in "hugh", "bough", "broughton"
            if (self.current > 1 && self.matches_rel(-2, 1, &["B", "H", "D"]))
                || (self.current > 2 && self.matches_rel(-3, 1, &["B", "H", "D"]))
                || (self.current > 3 && self.matches_rel(-4, 1, &["B", "H"]))
            {
                return 2;
            }

            if self.current > 2
                && self.rel(-1) == 'U'
                && self.matches_rel(-3, 1, &["C", "G", "L", "R", "T"])
            {
                self.add("F");
            } else if self.current > 0 && self.rel(-1) != 'I' {
                self.add("K");
            }
            return 2;
        }

        if self.rel(1) == 'N' {
            if self.current == 1 && self.is_vowel_at(0) && !self.slavo_germanic {
                self.add2("KN", "N");
            } else if !self.matches_rel(2, 2, &["EY"]) && self.rel(1) != 'Y' && !self.slavo_germanic
            {
                self.add2("N", "KN");
            } else {
                self.add("KN");
            }
            return 2;
        }

        if self.matches_rel(1, 2, &["LI"]) && !self.slavo_germanic {
            self.add2("KL", "L");
            return 2;
        }

        if self.current == 0
            && (self.rel(1) == 'Y'
                || self.matches_rel(
                    1,
                    2,
                    &["ES", "EP", "EB", "EL", "EY", "IB", "IL", "IN", "IE", "EI", "ER"],
                ))
        {
            self.add2("K", "J");
            return 2;
        }

        if (self.matches_rel(1, 2, &["ER"]) || self.rel(1) == 'Y')
            && !self.matches_at(0, 6, &["DANGER", "RANGER", "MANGER"])
            && !self.matches_rel(-1, 1, &["E", "I"])
            && !self.matches_rel(-1, 3, &["RGY", "OGY"])
        {
            self.add2("K", "J");
            return 2;
        }

        if self.matches_rel(1, 1, &["E", "I", "Y"]) || self.matches_rel(-1, 4, &["AGGI", "OGGI"]) {
            if self.is_germanic_prefix() || self.matches_rel(1, 2, &["ET"]) {
                self.add("K");
            } else if self.matches_rel(1, 4, &["IER "]) {
                self.add("J");
            } else {
                self.add2("J", "K");
            }
            return 2;
        }

        self.add("K");
        if self.rel(1) == 'G' { 2 } else { 1 }
    }

    fn encode_j(&mut self) -> usize {
        if self.matches_rel(0, 4, &["JOSE"]) || self.matches_at(0, 4, &["SAN "]) {
            if (self.current == 0 && self.rel(4) == ' ') || self.matches_at(0, 4, &["SAN "]) {
                self.add("H");
            } else {
                self.add2("J", "H");
            }
            return 1;
        }

        if self.current == 0 && !self.matches_rel(0, 4, &["JOSE"]) {
            self.add2("J", "A");
        } else if self.is_vowel_rel(-1)
            && !self.slavo_germanic
            && matches!(self.rel(1), 'A' | 'O')
        {
            self.add2("J", "H");
        } else if self.current == self.last() {
            self.add2("J", "");
        } else if !self.matches_rel(1, 1, &["L", "T", "K", "S", "N", "M", "B", "Z"])
            && !self.matches_rel(-1, 1, &["S", "K", "L"])
        {
            self.add("J");
        }

        if self.rel(1) == 'J' { 2 } else { 1 }
    }

    fn encode_l(&mut self) -> usize {
        if self.rel(1) == 'L' {
            // Spanish "cabrillo", "gallegos"
            let last = self.last() as isize;
            let spanish = (self.current + 3 == self.len()
                && self.matches_rel(-1, 4, &["ILLO", "ILLA", "ALLE"]))
                || ((self.matches_at(last - 1, 2, &["AS", "OS"])
                    || self.matches_at(last, 1, &["A", "O"]))
                    && self.matches_rel(-1, 4, &["ALLE"]));
            if spanish {
                self.add2("L", "");
            } else {
                self.add("L");
            }
            return 2;
        }

        self.add("L");
        1
    }

    fn encode_s(&mut self) -> usize {
        if self.matches_rel(-1, 3, &["ISL", "YSL"]) {
            return 1;
        }

        if self.current == 0 && self.matches_rel(0, 5, &["SUGAR"]) {
            self.add2("X", "S");
            return 1;
        }

        if self.matches_rel(0, 2, &["SH"]) {
            if self.matches_rel(1, 4, &["HEIM", "HOEK", "HOLM", "HOLZ"]) {
                self.add("S");
            } else {
                self.add("X");
            }
            return 2;
        }

        if self.matches_rel(0, 3, &["SIO", "SIA"]) || self.matches_rel(0, 4, &["SIAN"]) {
            if self.slavo_germanic {
                self.add("S");
            } else {
                self.add2("S", "X");
            }
            return 3;
        }

        if (self.current == 0 && self.matches_rel(1, 1, &["M", "N", "L", "W"]))
            || self.matches_rel(1, 1, &["Z"])
        {
            self.add2("S", "X");
            return if self.rel(1) == 'Z' { 2 } else { 1 };
        }

        if self.matches_rel(0, 2, &["SC"]) {
            if self.rel(2) == 'H' {
                if self.matches_rel(3, 2, &["OO", "ER", "EN", "UY", "ED", "EM"]) {
                    if self.matches_rel(3, 2, &["ER", "EN"]) {
                        self.add2("X", "SK");
                    } else {
                        self.add("SK");
                    }
                } else if self.current == 0 && !self.is_vowel_at(3) && self.at(3) != 'W' {
                    self.add2("X", "S");
                } else {
                    self.add("X");
                }
                return 3;
            }

            if self.matches_rel(2, 1, &["I", "E", "Y"]) {
                self.add("S");
            } else {
                self.add("SK");
            }
            return 3;
        }

        // French "resnais", "artois"
        if self.current == self.last() && self.matches_rel(-2, 2, &["AI", "OI"]) {
            self.add2("", "S");
        } else {
            self.add("S");
        }

        if matches!(self.rel(1), 'S' | 'Z') { 2 } else { 1 }
    }

    fn encode_t(&mut self) -> usize {
        if self.matches_rel(0, 4, &["TION"]) {
            self.add("X");
            return 3;
        }

        if self.matches_rel(0, 3, &["TIA", "TCH"]) {
            self.add("X");
            return 3;
        }

        if self.matches_rel(0, 2, &["TH"]) || self.matches_rel(0, 3, &["TTH"]) {
            if self.matches_rel(2, 2, &["OM", "AM"]) || self.is_germanic_prefix() {
                self.add("T");
            } else {
                self.add2("0", "T");
            }
            return 2;
        }

        self.add("T");
        if matches!(self.rel(1), 'T' | 'D') { 2 } else { 1 }
    }

    fn encode_w(&mut self) -> usize {
        if self.matches_rel(0, 2, &["WR"]) {
            self.add("R");
            return 2;
        }

        if self.current == 0 && (self.is_vowel_rel(1) || self.matches_rel(0, 2, &["WH"])) {
            if self.is_vowel_rel(1) {
                self.add2("A", "F");
            } else {
                self.add("A");
            }
        }

        if (self.current == self.last() && self.is_vowel_rel(-1))
            || self.matches_rel(-1, 5, &["EWSKI", "EWSKY", "OWSKI", "OWSKY"])
            || self.matches_at(0, 3, &["SCH"])
        {
            self.add2("", "F");
            return 1;
        }

        if self.matches_rel(0, 4, &["WICZ", "WITZ"]) {
            self.add2("TS", "FX");
            return 4;
        }

        1
    }

    fn encode_z(&mut self) -> usize {
        if self.rel(1) == 'H' {
            self.add("J");
            return 2;
        }

        if self.matches_rel(1, 2, &["ZO", "ZI", "ZA"])
            || (self.slavo_germanic && self.current > 0 && self.rel(-1) != 'T')
        {
            self.add2("S", "TS");
        } else {
            self.add("S");
        }

        if self.rel(1) == 'Z' { 2 } else { 1 }
    }
}
