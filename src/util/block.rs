use std::{
    future::Future,
    task::{Context, Poll},
    thread,
    time::Duration,
};

use futures::task::noop_waker_ref;

/// Drive a future to completion on the current thread. Client calls are one
/// synchronous round trip each; this is the bridge from the async SDK.
pub fn block_on<Fut>(future: Fut) -> Fut::Output
where
    Fut: Future,
{
    let mut future = Box::pin(future);
    let mut context = Context::from_waker(noop_waker_ref());

    loop {
        match future.as_mut().poll(&mut context) {
            Poll::Ready(output) => {
                return output;
            }
            Poll::Pending => {
                thread::sleep(Duration::from_millis(10));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_on_ready() {
        let result = block_on(std::future::ready(42));
        assert_eq!(result, 42);
    }

    #[test]
    fn test_block_on_pending_once() {
        let mut polled = false;
        let future = std::future::poll_fn(move |_cx| {
            if polled {
                Poll::Ready("done")
            } else {
                polled = true;
                Poll::Pending
            }
        });

        let result = block_on(future);
        assert_eq!(result, "done");
    }
}
