const CODE_LEN: usize = 4;

/// Digit class for a consonant. `None` for letters that are skipped
/// (vowels plus H, W and Y).
fn letter_class(letter: char) -> Option<char> {
    match letter {
        'B' | 'F' | 'P' | 'V' => Some('1'),
        'C' | 'G' | 'J' | 'K' | 'Q' | 'S' | 'X' | 'Z' => Some('2'),
        'D' | 'T' => Some('3'),
        'L' => Some('4'),
        'M' | 'N' => Some('5'),
        'R' => Some('6'),
        _ => None,
    }
}

/// Soundex-style 4-character code for a name.
///
/// The first letter is kept and the rest map to digit classes. Skipped
/// letters never reset the adjacency check, so only consecutive *appended*
/// digits collapse. Blank or letterless names give an empty code.
pub fn phonetic_code(name: Option<&str>) -> String {
    let letters: Vec<char> = name
        .unwrap_or_default()
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase())
        .collect();

    let Some((&first, rest)) = letters.split_first() else {
        return String::new();
    };

    let mut code = String::with_capacity(CODE_LEN);
    code.push(first);
    let mut last_code: Option<char> = None;

    for &letter in rest {
        if code.len() >= CODE_LEN {
            break;
        }
        let Some(class) = letter_class(letter) else {
            continue;
        };
        if last_code == Some(class) {
            continue;
        }
        code.push(class);
        last_code = Some(class);
    }

    while code.len() < CODE_LEN {
        code.push('0');
    }
    code
}

/// True when both names produce the same non-empty phonetic code
pub fn sounds_alike(a: Option<&str>, b: Option<&str>) -> bool {
    let code_a = phonetic_code(a);
    !code_a.is_empty() && code_a == phonetic_code(b)
}
