//! The rotor bank: eight key-derived permutations over the Basic Multilingual
//! Plane, each with a rotating offset and a set of notches that carry the
//! rotation into the next rotor.
//!
//! This is the Enigma half of Problema. Unlike a historical Enigma, which
//! permutes 26 letters, each rotor here permutes the entire BMP
//! (`[0, 65536)`), and there are eight of them instead of three, each
//! potentially advancing more than one neighbor per step depending on its
//! notch count.

use crate::trace;

/// BMP size; the domain and codomain of every rotor mapping and the
/// plugboard.
pub const ROTOR_SIZE: usize = 65536;

/// Number of rotors in the bank.
pub const NUM_ROTORS: usize = 8;

/// A single rotor: a permutation of `[0, ROTOR_SIZE)`, a current position,
/// and the notch positions that trigger the next rotor's advance.
#[derive(Clone)]
pub struct Rotor {
    pub(crate) mapping: Box<[u32; ROTOR_SIZE]>,
    pub(crate) position: u32,
    pub(crate) notches: Vec<u32>,
}

impl Rotor {
    /// Build a rotor from key material: position, notch set, and the
    /// permutation table are each derived from the 32-byte key independently
    /// of the other seven rotors.
    ///
    /// `position` comes from a single key byte, so its effective range is
    /// `[0, 256)` rather than the full rotor size, preserved from the
    /// reference, which derives it the same way.
    pub(crate) fn from_key(key: &[u8; 32], index: usize) -> Rotor {
        let position = key[index] as u32 % ROTOR_SIZE as u32;

        let num_notches = (key[(index + 1) % 32] % 7) + 1;
        let notches = (0..num_notches)
            .map(|n| (key[(index + n as usize + 2) % 32] as u32 * 251) % ROTOR_SIZE as u32)
            .collect();

        let mut mapping: Box<[u32; ROTOR_SIZE]> = Box::new([0; ROTOR_SIZE]);
        for (i, slot) in mapping.iter_mut().enumerate() {
            *slot = i as u32;
        }
        // Fisher-Yates, but `j` is derived from an 8-bit key byte and the
        // loop index rather than a real PRNG, so the resulting permutation
        // is far from uniform. Preserved from the reference.
        for i in (1..ROTOR_SIZE).rev() {
            let j = (key[(index + i) % 32] as usize * i) % (i + 1);
            mapping.swap(i, j);
        }

        Rotor { mapping, position, notches }
    }

    /// Build the functional inverse of `self`, keeping `position` and
    /// `notches` in sync with the forward rotor.
    pub(crate) fn inverse(&self) -> Rotor {
        let mut mapping: Box<[u32; ROTOR_SIZE]> = Box::new([0; ROTOR_SIZE]);
        for (i, &m) in self.mapping.iter().enumerate() {
            mapping[m as usize] = i as u32;
        }
        Rotor { mapping, position: self.position, notches: self.notches.clone() }
    }

    fn is_at_notch(&self) -> bool {
        self.notches.contains(&self.position)
    }
}

/// The eight forward rotors and their eight inverse companions, advanced as
/// one unit.
#[derive(Clone)]
pub struct RotorBank {
    forward: [Rotor; NUM_ROTORS],
    inverse: [Rotor; NUM_ROTORS],
}

impl RotorBank {
    pub(crate) fn from_key(key: &[u8; 32]) -> RotorBank {
        let forward: Vec<Rotor> = (0..NUM_ROTORS).map(|r| Rotor::from_key(key, r)).collect();
        let inverse: Vec<Rotor> = forward.iter().map(Rotor::inverse).collect();
        RotorBank {
            forward: forward.try_into().unwrap_or_else(|_| unreachable!()),
            inverse: inverse.try_into().unwrap_or_else(|_| unreachable!()),
        }
    }

    /// Apply the forward cascade: rotor 0 through rotor 7, each shifting the
    /// code point by its position before lookup and shifting back after.
    ///
    /// Code points at or beyond `ROTOR_SIZE` bypass the cascade unchanged,
    /// they lie outside the Basic Multilingual Plane that the rotors permute.
    pub(crate) fn forward(&self, input: u32) -> u32 {
        if input as usize >= ROTOR_SIZE {
            return input;
        }
        let mut y = input;
        for rotor in &self.forward {
            let p = rotor.position;
            y = rotor.mapping[((y + p) as usize) % ROTOR_SIZE];
            y = (y + ROTOR_SIZE as u32 - p) % ROTOR_SIZE as u32;
        }
        trace::trace_unicode("forward cascade", y);
        y
    }

    /// Apply the backward cascade: rotor 7 through rotor 0, using each
    /// rotor's inverse mapping. The exact mirror of [`forward`](Self::forward).
    pub(crate) fn backward(&self, input: u32) -> u32 {
        if input as usize >= ROTOR_SIZE {
            return input;
        }
        let mut y = input;
        for rotor in self.inverse.iter().rev() {
            let p = rotor.position;
            y = (y + p) % ROTOR_SIZE as u32;
            y = rotor.mapping[y as usize];
            y = (y + ROTOR_SIZE as u32 - p) % ROTOR_SIZE as u32;
        }
        trace::trace_unicode("backward cascade", y);
        y
    }

    /// Advance the rotor bank by one code point: rotor 0 always steps, and
    /// the step carries into rotor `r + 1` as long as rotor `r` lands on one
    /// of its notches, checked against the *post*-increment position, not
    /// the pre-increment one, which is the reference's actual behavior
    /// despite reading like an odometer carry.
    pub(crate) fn advance(&mut self) {
        self.forward[0].position = (self.forward[0].position + 1) % ROTOR_SIZE as u32;
        self.inverse[0].position = self.forward[0].position;

        for r in 0..NUM_ROTORS - 1 {
            if self.forward[r].is_at_notch() {
                self.forward[r + 1].position = (self.forward[r + 1].position + 1) % ROTOR_SIZE as u32;
                self.inverse[r + 1].position = self.forward[r + 1].position;
            } else {
                break;
            }
        }

        trace::trace_positions(self.forward.iter().map(|r| r.position));
    }

    #[cfg(test)]
    pub(crate) fn positions(&self) -> [u32; NUM_ROTORS] {
        let mut out = [0u32; NUM_ROTORS];
        for (o, r) in out.iter_mut().zip(self.forward.iter()) {
            *o = r.position;
        }
        out
    }

    #[cfg(test)]
    pub(crate) fn forward_rotor(&self, index: usize) -> &Rotor {
        &self.forward[index]
    }

    #[cfg(test)]
    pub(crate) fn inverse_rotor(&self, index: usize) -> &Rotor {
        &self.inverse[index]
    }
}
