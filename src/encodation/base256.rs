use super::{EncodationType, EncodingContext};

/// Perform the 255 state randomization as defined in the standard.
///
/// `pos` must be the number of the byte to be written w.r.t. to the full
/// codeword vector, the number is 1-based.
fn randomize_255_state(ch: u8, pos: usize) -> u8 {
    let pseudo_random = ((149 * pos) % 255) + 1;
    let tmp = ch as u16 + pseudo_random as u16;
    if tmp <= 255 {
        tmp as u8
    } else {
        (tmp - 256) as u8
    }
}

pub(super) fn push_byte<T: EncodingContext>(ctx: &mut T) {
    if let Some(ch) = ctx.eat() {
        ctx.push(ch);
    }
}

/// Copy the next byte, return `false` if the run ends before it.
pub(super) fn step<T: EncodingContext>(ctx: &mut T, start: usize) -> bool {
    if ctx.next_mode(EncodationType::Base256) != EncodationType::Base256 {
        finish_run(ctx.codewords_mut(), start);
        return false;
    }
    push_byte(ctx);
    true
}

/// Insert the length of the run starting at `start` and randomize it.
///
/// The run must end with the last codeword.
pub(super) fn finish_run(codewords: &mut Vec<u8>, start: usize) {
    let count = codewords.len() - start;
    if count <= 249 {
        codewords.insert(start, count as u8);
    } else {
        let length = [((count / 250) + 249) as u8, (count % 250) as u8];
        codewords.splice(start..start, length);
    }
    for (i, cw) in codewords.iter_mut().enumerate().skip(start) {
        *cw = randomize_255_state(*cw, i + 1);
    }
}

#[cfg(test)]
fn derandomize(codewords: &[u8]) -> Vec<u8> {
    codewords
        .iter()
        .enumerate()
        .map(|(i, cw)| {
            let pseudo_random = (((149 * (i + 1)) % 255) + 1) as u16;
            ((*cw as u16 + 256 - pseudo_random) % 256) as u8
        })
        .collect()
}

#[test]
fn test_randomize() {
    assert_eq!(randomize_255_state(0, 1), 150);
    assert_eq!(randomize_255_state(200, 1), 94);
    assert_eq!(randomize_255_state(5, 2), 49);
}

#[test]
fn test_short_run() {
    let mut cws = vec![231, 0xA0, 0xA1];
    finish_run(&mut cws, 1);
    assert_eq!(cws.len(), 4);
    assert_eq!(derandomize(&cws)[1..], [2, 0xA0, 0xA1]);
}

#[test]
fn test_length_boundaries() {
    for (count, prefix) in [(249, vec![249]), (250, vec![250, 0]), (300, vec![250, 50])] {
        let mut cws = vec![231];
        cws.extend((0..count).map(|i| (i % 256) as u8));
        finish_run(&mut cws, 1);
        assert_eq!(cws.len(), 1 + prefix.len() + count);
        let plain = derandomize(&cws);
        assert_eq!(plain[1..1 + prefix.len()], prefix[..]);
        assert_eq!(plain[1 + prefix.len()], 0);
        assert_eq!(*plain.last().unwrap(), ((count - 1) % 256) as u8);
    }
}
