use crate::block_cipher::{BlockCipherSpi, KnownAnswer};
use crate::CipherError;

/// Life cycle state of an engine. A session key only exists while
/// initialized, so an uninitialized engine has nothing to leak.
pub enum CipherState<K> {
    Uninitialized,
    Initialized { block_size: usize, key: K },
}

/// Stateful wrapper around a concrete block cipher.
///
/// The engine owns the init/use/reset life cycle: operations on an
/// uninitialized engine fail with `NotInitialized`, re-keying requires an
/// explicit `reset` first, and `reset` scrubs the discarded session key.
pub struct BlockCipherEngine<C: BlockCipherSpi> {
    cipher: C,
    state: CipherState<C::SessionKey>,
}

impl<C: BlockCipherSpi> BlockCipherEngine<C> {
    pub fn new(cipher: C) -> Self {
        Self {
            cipher,
            state: CipherState::Uninitialized,
        }
    }

    pub fn name(&self) -> &'static str {
        C::NAME
    }

    pub fn block_sizes(&self) -> &'static [usize] {
        self.cipher.block_sizes()
    }

    pub fn key_sizes(&self) -> &'static [usize] {
        self.cipher.key_sizes()
    }

    /// Block size of the current session.
    pub fn current_block_size(&self) -> Result<usize, CipherError> {
        match &self.state {
            CipherState::Initialized { block_size, .. } => Ok(*block_size),
            CipherState::Uninitialized => Err(CipherError::NotInitialized),
        }
    }

    /// Expand `material` into a session key. `block_size` of `None` selects
    /// the cipher default.
    pub fn init(&mut self, material: &[u8], block_size: Option<usize>) -> Result<(), CipherError> {
        if let CipherState::Initialized { .. } = self.state {
            return Err(CipherError::AlreadyInitialized);
        }

        let bs = match block_size {
            Some(bs) => {
                if !self.cipher.block_sizes().contains(&bs) {
                    return Err(CipherError::UnsupportedBlockSize {
                        cipher: C::NAME,
                        real: bs,
                    });
                }
                bs
            }
            None => self.cipher.default_block_size(),
        };

        let key = self.cipher.make_key(material, bs)?;
        self.state = CipherState::Initialized {
            block_size: bs,
            key,
        };
        Ok(())
    }

    /// Return to the uninitialized state. Idempotent.
    pub fn reset(&mut self) {
        if let CipherState::Initialized { key, .. } = &mut self.state {
            self.cipher.scrub_key(key);
        }
        self.state = CipherState::Uninitialized;
    }

    pub fn encrypt_block(&self, input: &[u8], output: &mut [u8]) -> Result<(), CipherError> {
        let (bs, key) = self.session(input, output)?;
        self.cipher.encrypt(input, output, key, bs);
        Ok(())
    }

    pub fn decrypt_block(&self, input: &[u8], output: &mut [u8]) -> Result<(), CipherError> {
        let (bs, key) = self.session(input, output)?;
        self.cipher.decrypt(input, output, key, bs);
        Ok(())
    }

    fn session(
        &self,
        input: &[u8],
        output: &[u8],
    ) -> Result<(usize, &C::SessionKey), CipherError> {
        match &self.state {
            CipherState::Initialized { block_size, key } => {
                if input.len() != *block_size {
                    return Err(CipherError::InvalidBlockSize {
                        target: *block_size,
                        real: input.len(),
                    });
                }
                if output.len() != *block_size {
                    return Err(CipherError::InvalidBlockSize {
                        target: *block_size,
                        real: output.len(),
                    });
                }
                Ok((*block_size, key))
            }
            CipherState::Uninitialized => Err(CipherError::NotInitialized),
        }
    }

    /// Correctness check over every advertised parameter combination plus
    /// the cipher's known answer vectors. Returns `false` on any mismatch
    /// and never panics.
    pub fn self_test(&self) -> bool {
        for &ks in self.cipher.key_sizes() {
            for &bs in self.cipher.block_sizes() {
                if !self.test_symmetry(ks, bs) {
                    return false;
                }
            }
        }

        for ka in self.cipher.known_answers() {
            if !self.test_known_answer(ka) {
                return false;
            }
        }

        true
    }

    // encrypt then decrypt a deterministic pattern and compare
    fn test_symmetry(&self, ks: usize, bs: usize) -> bool {
        let material = (0..ks).map(|i| i as u8).collect::<Vec<_>>();
        let pt = (0..bs).map(|i| i as u8).collect::<Vec<_>>();

        let key = match self.cipher.make_key(material.as_slice(), bs) {
            Ok(key) => key,
            Err(_) => return false,
        };

        let (mut ct, mut back) = (vec![0u8; bs], vec![0u8; bs]);
        self.cipher.encrypt(pt.as_slice(), ct.as_mut_slice(), &key, bs);
        self.cipher.decrypt(ct.as_slice(), back.as_mut_slice(), &key, bs);
        back == pt
    }

    fn test_known_answer(&self, ka: &KnownAnswer) -> bool {
        let bs = ka.ciphertext.len();
        let key = match self.cipher.make_key(ka.key, bs) {
            Ok(key) => key,
            Err(_) => return false,
        };

        let pt = vec![0u8; bs];
        let (mut ct, mut back) = (vec![0u8; bs], vec![0u8; bs]);
        self.cipher.encrypt(pt.as_slice(), ct.as_mut_slice(), &key, bs);
        if ct != ka.ciphertext {
            return false;
        }

        self.cipher.decrypt(ct.as_slice(), back.as_mut_slice(), &key, bs);
        back == pt
    }
}

#[cfg(test)]
mod tests {
    use crate::block_cipher::{BlockCipherEngine, NullCipher, Serpent};
    use crate::CipherError;

    #[test]
    fn life_cycle() {
        let mut engine = BlockCipherEngine::new(Serpent);
        let (pt, mut ct) = ([0u8; 16], [0u8; 16]);

        assert_eq!(
            engine.encrypt_block(&pt, &mut ct),
            Err(CipherError::NotInitialized)
        );
        assert_eq!(
            engine.decrypt_block(&pt, &mut ct),
            Err(CipherError::NotInitialized)
        );
        assert_eq!(engine.current_block_size(), Err(CipherError::NotInitialized));

        engine.init(&[0u8; 16], None).unwrap();
        assert_eq!(engine.current_block_size(), Ok(16));
        assert_eq!(
            engine.init(&[0u8; 16], None),
            Err(CipherError::AlreadyInitialized)
        );

        engine.encrypt_block(&pt, &mut ct).unwrap();

        // reset is idempotent and permits re-keying
        engine.reset();
        engine.reset();
        engine.init(&[1u8; 32], Some(16)).unwrap();
        engine.encrypt_block(&pt, &mut ct).unwrap();
    }

    #[test]
    fn rejects_bad_parameters() {
        let mut engine = BlockCipherEngine::new(Serpent);

        assert_eq!(
            engine.init(&[0u8; 16], Some(24)),
            Err(CipherError::UnsupportedBlockSize {
                cipher: "serpent",
                real: 24
            })
        );
        assert!(matches!(
            engine.init(&[0u8; 15], None),
            Err(CipherError::InvalidKeySize { real: 15, .. })
        ));

        // a failed init leaves the engine uninitialized
        assert_eq!(engine.current_block_size(), Err(CipherError::NotInitialized));

        engine.init(&[0u8; 16], None).unwrap();
        let (pt, mut ct) = ([0u8; 8], [0u8; 16]);
        assert_eq!(
            engine.encrypt_block(&pt, &mut ct),
            Err(CipherError::InvalidBlockSize {
                target: 16,
                real: 8
            })
        );
        let (pt, mut ct) = ([0u8; 16], [0u8; 24]);
        assert_eq!(
            engine.encrypt_block(&pt, &mut ct),
            Err(CipherError::InvalidBlockSize {
                target: 16,
                real: 24
            })
        );
    }

    #[test]
    fn self_test_passes() {
        assert!(BlockCipherEngine::new(Serpent).self_test());
        assert!(BlockCipherEngine::new(NullCipher).self_test());
    }
}
