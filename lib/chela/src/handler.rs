//! Post-response extraction steps.
//!
//! Steps are registered on a [`Requester`](crate::Requester) before
//! execution and run once, in registration order, against the received
//! response. Every step runs regardless of earlier outcomes; the chain
//! reports the last failure.

use crate::{Cookie, Error, Response, Result};

/// Type-erased decode target.
type DecodeFn<'dst> = Box<dyn FnMut(&Response) -> Result<()> + Send + 'dst>;

/// One registered extraction step holding its caller-supplied destination.
pub(crate) enum Step<'dst> {
    /// Assert the response status code.
    ExpectCode(u16),
    /// Copy parsed `Set-Cookie` headers into the destination.
    ToCookies(&'dst mut Vec<Cookie>),
    /// JSON-decode the body into the destination.
    Decode(DecodeFn<'dst>),
    /// Copy the body as UTF-8 text into the destination.
    ToString(&'dst mut String),
    /// Copy the raw body bytes into the destination.
    ToBytes(&'dst mut Vec<u8>),
}

impl Step<'_> {
    fn run(&mut self, response: &Response) -> Result<()> {
        match self {
            Self::ExpectCode(expected) => {
                let actual = response.status();
                if actual == *expected {
                    Ok(())
                } else {
                    Err(Error::UnexpectedStatus {
                        expected: *expected,
                        actual,
                    })
                }
            }
            Self::ToCookies(dest) => {
                **dest = response.cookies();
                Ok(())
            }
            Self::Decode(decode) => decode(response),
            Self::ToString(dest) => {
                **dest = response.text()?;
                Ok(())
            }
            Self::ToBytes(dest) => {
                **dest = response.body().to_vec();
                Ok(())
            }
        }
    }
}

impl std::fmt::Debug for Step<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::ExpectCode(code) => return write!(f, "ExpectCode({code})"),
            Self::ToCookies(_) => "ToCookies",
            Self::Decode(_) => "Decode",
            Self::ToString(_) => "ToString",
            Self::ToBytes(_) => "ToBytes",
        };
        f.write_str(name)
    }
}

/// Run every step against the response, in registration order.
///
/// No step is skipped because an earlier one failed; the returned error is
/// the last failure observed (last-write-wins).
pub(crate) fn run_steps(steps: &mut [Step<'_>], response: &Response) -> Result<()> {
    let mut failure = None;
    for step in steps {
        if let Err(err) = step.run(response) {
            failure = Some(err);
        }
    }
    failure.map_or(Ok(()), Err)
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::{HeaderMap, HeaderValue};

    use super::*;

    fn response(status: u16, body: &'static str) -> Response {
        Response::new(status, HeaderMap::new(), Bytes::from_static(body.as_bytes()))
    }

    #[test]
    fn expect_code_match() {
        let mut steps = vec![Step::ExpectCode(200)];
        assert!(run_steps(&mut steps, &response(200, "")).is_ok());
    }

    #[test]
    fn expect_code_mismatch() {
        let mut steps = vec![Step::ExpectCode(200)];
        let err = run_steps(&mut steps, &response(404, "")).expect_err("mismatch");
        assert_eq!(err.to_string(), "expect code 200, got 404");
    }

    #[test]
    fn to_string_and_to_bytes() {
        let mut text = String::new();
        let mut bytes = Vec::new();
        let mut steps = vec![Step::ToString(&mut text), Step::ToBytes(&mut bytes)];

        run_steps(&mut steps, &response(200, "hello")).expect("steps");
        drop(steps);

        assert_eq!(text, "hello");
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn empty_body_yields_empty_destinations() {
        let mut text = String::from("stale");
        let mut bytes = vec![1, 2, 3];
        let mut steps = vec![Step::ToString(&mut text), Step::ToBytes(&mut bytes)];

        run_steps(&mut steps, &response(200, "")).expect("steps");
        drop(steps);

        assert_eq!(text, "");
        assert!(bytes.is_empty());
    }

    #[test]
    fn to_cookies_copies_parsed_headers() {
        let mut headers = HeaderMap::new();
        headers.append(
            http::header::SET_COOKIE,
            HeaderValue::from_static("session=abc"),
        );
        let response = Response::new(200, headers, Bytes::new());

        let mut cookies = Vec::new();
        let mut steps = vec![Step::ToCookies(&mut cookies)];
        run_steps(&mut steps, &response).expect("steps");
        drop(steps);

        assert_eq!(cookies, vec![Cookie::new("session", "abc")]);
    }

    #[test]
    fn later_steps_run_after_a_failure() {
        let mut text = String::new();
        let mut steps = vec![Step::ExpectCode(200), Step::ToString(&mut text)];

        let err = run_steps(&mut steps, &response(500, "oops")).expect_err("status");
        drop(steps);

        // The failed assertion does not stop the extraction behind it.
        assert_eq!(err.op(), "expect_code");
        assert_eq!(text, "oops");
    }

    #[test]
    fn last_failure_wins() {
        let mut steps = vec![
            Step::ExpectCode(200),
            Step::Decode(Box::new(|response| {
                let _: u32 = crate::from_json(response.body())?;
                Ok(())
            })),
        ];

        // Status mismatch first, then a decode failure: the decode error is
        // the one reported.
        let err = run_steps(&mut steps, &response(404, "not json")).expect_err("decode");
        assert_eq!(err.op(), "decode");
    }
}
