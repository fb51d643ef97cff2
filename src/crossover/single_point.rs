use super::Crossover;
use crate::{
    error::{GeneticError, Result},
    genotype::{BitString, Genotype},
    rng::RandomSource,
};

/// Exchanges the tails of two bit strings after a random cut in `[1, len - 1]`.
///
/// Strings shorter than two bits have no cut point and are left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct SinglePointCrossover;

impl Crossover<BitString> for SinglePointCrossover {
    fn crossover(
        &self,
        first: &mut BitString,
        second: &mut BitString,
        rng: &mut dyn RandomSource,
    ) -> Result<()> {
        if first.len() != second.len() {
            return Err(GeneticError::InvalidGenotype(format!(
                "cannot cross bit strings of length {} and {}",
                first.len(),
                second.len()
            )));
        }
        let len = first.len();
        if len < 2 {
            return Ok(());
        }

        let cut = rng.uniform_int(1, len - 1);
        for i in cut..len {
            std::mem::swap(&mut first.bits_mut()[i], &mut second.bits_mut()[i]);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;

    #[test]
    fn test_tails_are_exchanged() {
        let mut first = BitString::new(vec![true; 5]);
        let mut second = BitString::new(vec![false; 5]);
        let mut rng = ScriptedRng::new(vec![3], vec![]);

        SinglePointCrossover
            .crossover(&mut first, &mut second, &mut rng)
            .unwrap();

        assert_eq!(first.bits(), &[true, true, true, false, false]);
        assert_eq!(second.bits(), &[false, false, false, true, true]);
    }

    #[test]
    fn test_single_bit_untouched() {
        let mut first = BitString::new(vec![true]);
        let mut second = BitString::new(vec![false]);
        let mut rng = ScriptedRng::new(vec![], vec![]);

        SinglePointCrossover
            .crossover(&mut first, &mut second, &mut rng)
            .unwrap();

        assert_eq!(first.bits(), &[true]);
        assert_eq!(second.bits(), &[false]);
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let mut first = BitString::new(vec![true; 3]);
        let mut second = BitString::new(vec![false; 4]);
        let mut rng = ScriptedRng::new(vec![], vec![]);
        assert!(SinglePointCrossover
            .crossover(&mut first, &mut second, &mut rng)
            .is_err());
    }
}
